use std::str::FromStr;

use crate::error::{GisError, Result};
use crate::generation::ApiGeneration;

/// Environment variable selecting the notice policy (`log` or `record`).
pub const NOTICE_POLICY_ENV: &str = "GIS_NOTICE_POLICY";

/// Prefix put in front of every forwarded GEOS notice.
pub const DEFAULT_TAG: &str = "GIS: ";

/// What happens to a GEOS notice besides being logged.
///
/// The two GEOS API generations historically disagreed here: the legacy
/// handlers wrote notices into the last-error slot, the reentrant ones did
/// not. Both backends follow whichever policy is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticePolicy {
    /// Log at WARN, leave the last error untouched.
    #[default]
    LogOnly,
    /// Log at WARN and overwrite the last error.
    LogAndRecord,
}

impl NoticePolicy {
    /// The policy GEOS's own handler plumbing implies for `generation`.
    pub fn native(generation: ApiGeneration) -> Self {
        if generation.native_notice_records() {
            NoticePolicy::LogAndRecord
        } else {
            NoticePolicy::LogOnly
        }
    }

    pub fn records(self) -> bool {
        matches!(self, NoticePolicy::LogAndRecord)
    }
}

impl FromStr for NoticePolicy {
    type Err = GisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "log-only" => Ok(NoticePolicy::LogOnly),
            "record" | "log-and-record" => Ok(NoticePolicy::LogAndRecord),
            _ => Err(GisError::InvalidPolicy(s.to_string())),
        }
    }
}

/// Settings shared by every context created by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub notice_policy: NoticePolicy,
    pub tag: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            notice_policy: NoticePolicy::default(),
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn with_notice_policy(mut self, policy: NoticePolicy) -> Self {
        self.notice_policy = policy;
        self
    }

    /// Read overrides from the process environment.
    ///
    /// # Errors
    /// Returns `GisError::InvalidPolicy` if `GIS_NOTICE_POLICY` is set to an
    /// unknown value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BridgeConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(policy) = lookup(NOTICE_POLICY_ENV) {
            config.notice_policy = policy.parse()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.notice_policy, NoticePolicy::LogOnly);
        assert_eq!(config.tag, "GIS: ");
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("log".parse::<NoticePolicy>().unwrap(), NoticePolicy::LogOnly);
        assert_eq!(
            " Record ".parse::<NoticePolicy>().unwrap(),
            NoticePolicy::LogAndRecord
        );
        assert_eq!(
            "log-and-record".parse::<NoticePolicy>().unwrap(),
            NoticePolicy::LogAndRecord
        );
        assert_eq!(
            "verbose".parse::<NoticePolicy>(),
            Err(GisError::InvalidPolicy("verbose".to_string()))
        );
    }

    #[test]
    fn test_native_policy() {
        assert_eq!(
            NoticePolicy::native(ApiGeneration::Legacy),
            NoticePolicy::LogAndRecord
        );
        assert_eq!(
            NoticePolicy::native(ApiGeneration::Reentrant),
            NoticePolicy::LogOnly
        );
    }

    #[test]
    fn test_from_lookup_unset() {
        let config = BridgeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_from_lookup_record() {
        let config = BridgeConfig::from_lookup(|key| {
            (key == NOTICE_POLICY_ENV).then(|| "record".to_string())
        })
        .unwrap();
        assert_eq!(config.notice_policy, NoticePolicy::LogAndRecord);
    }

    #[test]
    fn test_from_lookup_invalid() {
        let err = BridgeConfig::from_lookup(|_| Some("loud".to_string())).unwrap_err();
        assert!(matches!(err, GisError::InvalidPolicy(v) if v == "loud"));
    }
}
