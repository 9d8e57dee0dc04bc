use thiserror::Error;

use crate::generation::ApiGeneration;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GisError {
    /// Message captured from the GEOS error handler.
    #[error("{0}")]
    Native(String),
    #[error("failed to initialize {generation} GEOS context")]
    InitFailed { generation: ApiGeneration },
    #[error("invalid notice policy: {0:?} (expected \"log\" or \"record\")")]
    InvalidPolicy(String),
    #[error("invalid GEOS version string: {0:?}")]
    InvalidVersion(String),
}

pub type Result<T> = std::result::Result<T, GisError>;
