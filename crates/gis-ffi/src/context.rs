use gis_diag::{BridgeConfig, GeosContext, Result, LOG_TARGET};

use crate::geos::NativeGeos;

/// Opaque context handle given to the host: one per fiber.
pub struct GisGeosContext {
    pub inner: GeosContext<NativeGeos>,
}

impl GisGeosContext {
    /// Build a context with settings from the environment. An invalid
    /// `GIS_NOTICE_POLICY` falls back to the default policy.
    pub fn new() -> Result<Self> {
        let config = BridgeConfig::from_env().unwrap_or_else(|e| {
            log::warn!(target: LOG_TARGET, "{}, using default notice policy", e);
            BridgeConfig::default()
        });
        Ok(Self {
            inner: GeosContext::new(NativeGeos::default(), &config)?,
        })
    }
}
