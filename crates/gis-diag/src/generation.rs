use std::fmt;
use std::str::FromStr;

use crate::error::{GisError, Result};

/// GEOS C-API generation used to route notices and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiGeneration {
    /// `initGEOS_r` with global printf-style handlers (GEOS < 3.5).
    Legacy,
    /// `GEOS_init_r` with per-context handlers and userdata (GEOS >= 3.5).
    Reentrant,
}

impl ApiGeneration {
    /// First GEOS release with `GEOSContext_set*MessageHandler_r`.
    pub const REENTRANT_SINCE: (u32, u32) = (3, 5);

    /// Pick the generation a given GEOS release supports.
    pub fn for_version(version: GeosVersion) -> Self {
        if (version.major, version.minor) >= Self::REENTRANT_SINCE {
            ApiGeneration::Reentrant
        } else {
            ApiGeneration::Legacy
        }
    }

    /// Whether GEOS itself, through this generation's handlers, would write
    /// notices into the last-error slot.
    pub fn native_notice_records(self) -> bool {
        matches!(self, ApiGeneration::Legacy)
    }
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiGeneration::Legacy => write!(f, "legacy"),
            ApiGeneration::Reentrant => write!(f, "reentrant"),
        }
    }
}

/// Release number parsed from `GEOSversion()`, e.g. `"3.11.1-CAPI-1.17.1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GeosVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GeosVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn generation(self) -> ApiGeneration {
        ApiGeneration::for_version(self)
    }
}

/// Leading decimal digits of `s`, e.g. `"0dev"` -> `0`.
fn leading_number(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

impl FromStr for GeosVersion {
    type Err = GisError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GisError::InvalidVersion(s.to_string());
        let release = s.trim().split('-').next().unwrap_or_default();
        let mut parts = release.split('.');
        let major = parts.next().and_then(leading_number).ok_or_else(invalid)?;
        let minor = parts.next().and_then(leading_number).ok_or_else(invalid)?;
        let patch = parts.next().and_then(leading_number).unwrap_or(0);
        Ok(GeosVersion::new(major, minor, patch))
    }
}

impl fmt::Display for GeosVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
