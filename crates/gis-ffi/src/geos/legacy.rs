use std::ptr::NonNull;

use gis_diag::trampoline::{legacy_error, legacy_notice};
use gis_diag::{ApiGeneration, DiagnosticState, GeosApi};

use super::sys::{self, GEOSContextHandle_HS};

/// GEOS < 3.5: `initGEOS_r` with global handlers that carry no userdata.
/// Messages reach the state bound to the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyGeos;

impl GeosApi for LegacyGeos {
    type Handle = NonNull<GEOSContextHandle_HS>;

    fn generation(&self) -> ApiGeneration {
        ApiGeneration::Legacy
    }

    fn version(&self) -> String {
        super::version_string()
    }

    unsafe fn init(&self, _state: NonNull<DiagnosticState>) -> Option<Self::Handle> {
        NonNull::new(sys::initGEOS_r(Some(legacy_notice), Some(legacy_error)))
    }

    unsafe fn finish(&self, handle: Self::Handle) {
        sys::finishGEOS_r(handle.as_ptr());
    }
}
