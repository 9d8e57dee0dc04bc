use std::ptr::NonNull;

use gis_diag::trampoline::{reentrant_error, reentrant_notice};
use gis_diag::{ApiGeneration, DiagnosticState, GeosApi};

use super::sys::{self, GEOSContextHandle_HS};

/// GEOS >= 3.5: `GEOS_init_r` with per-context handlers. The owning
/// `DiagnosticState` travels to the trampolines as userdata.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReentrantGeos;

impl GeosApi for ReentrantGeos {
    type Handle = NonNull<GEOSContextHandle_HS>;

    fn generation(&self) -> ApiGeneration {
        ApiGeneration::Reentrant
    }

    fn version(&self) -> String {
        super::version_string()
    }

    unsafe fn init(&self, state: NonNull<DiagnosticState>) -> Option<Self::Handle> {
        let handle = NonNull::new(sys::GEOS_init_r())?;
        let userdata = state.as_ptr().cast();
        sys::GEOSContext_setNoticeMessageHandler_r(handle.as_ptr(), Some(reentrant_notice), userdata);
        sys::GEOSContext_setErrorMessageHandler_r(handle.as_ptr(), Some(reentrant_error), userdata);
        Some(handle)
    }

    unsafe fn finish(&self, handle: Self::Handle) {
        sys::GEOS_finish_r(handle.as_ptr());
    }
}
