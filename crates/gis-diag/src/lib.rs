//! `gis-diag` - GEOS diagnostics bridge for tarantool-gis.
//!
//! This crate provides:
//! - A fixed-capacity, always terminated `ErrorBuffer` for the last GEOS error
//! - `DiagnosticState`, owned per context, that GEOS notices and errors land in
//! - The `GeosApi` trait covering both GEOS C API generations
//! - `GeosContext`, which owns a native context and turns failures into `GisError`
//! - `extern "C"` trampolines handed to GEOS as message handlers
//!
//! Notices are forwarded through the `log` facade at WARN with a `"GIS: "`
//! prefix; the embedding host decides where those records go.

pub mod api;
pub mod buffer;
pub mod config;
pub mod context;
pub mod error;
pub mod generation;
pub mod state;
pub mod trampoline;

#[cfg(test)]
mod testing;

pub use api::GeosApi;
pub use buffer::{ErrorBuffer, ERROR_BUFFER_CAPACITY};
pub use config::{BridgeConfig, NoticePolicy, DEFAULT_TAG, NOTICE_POLICY_ENV};
pub use context::GeosContext;
pub use error::{GisError, Result};
pub use generation::{ApiGeneration, GeosVersion};
pub use state::{DiagnosticState, LOG_TARGET};
