#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::os::raw::c_char;
#[cfg(feature = "geos")]
use std::os::raw::c_void;

#[cfg(feature = "geos-legacy")]
use gis_diag::trampoline::LegacyHandler;
#[cfg(feature = "geos")]
use gis_diag::trampoline::ReentrantHandler;

#[repr(C)]
pub struct GEOSContextHandle_HS {
    _private: [u8; 0],
}

pub type GEOSContextHandle_t = *mut GEOSContextHandle_HS;

#[cfg(test)]
#[repr(C)]
pub struct GEOSGeometry {
    _private: [u8; 0],
}

#[link(name = "geos_c")]
extern "C" {
    pub fn GEOSversion() -> *const c_char;

    #[cfg(feature = "geos")]
    pub fn GEOS_init_r() -> GEOSContextHandle_t;
    #[cfg(feature = "geos")]
    pub fn GEOSContext_setNoticeMessageHandler_r(
        handle: GEOSContextHandle_t,
        handler: Option<ReentrantHandler>,
        userdata: *mut c_void,
    ) -> Option<ReentrantHandler>;
    #[cfg(feature = "geos")]
    pub fn GEOSContext_setErrorMessageHandler_r(
        handle: GEOSContextHandle_t,
        handler: Option<ReentrantHandler>,
        userdata: *mut c_void,
    ) -> Option<ReentrantHandler>;
    #[cfg(feature = "geos")]
    pub fn GEOS_finish_r(handle: GEOSContextHandle_t);

    #[cfg(feature = "geos-legacy")]
    pub fn initGEOS_r(
        notice: Option<LegacyHandler>,
        error: Option<LegacyHandler>,
    ) -> GEOSContextHandle_t;
    #[cfg(feature = "geos-legacy")]
    pub fn finishGEOS_r(handle: GEOSContextHandle_t);

    #[cfg(test)]
    pub fn GEOSGeomFromWKT_r(handle: GEOSContextHandle_t, wkt: *const c_char) -> *mut GEOSGeometry;
    #[cfg(test)]
    pub fn GEOSGeom_destroy_r(handle: GEOSContextHandle_t, geom: *mut GEOSGeometry);
}
