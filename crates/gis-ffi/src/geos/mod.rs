//! Native GEOS backends.
//!
//! `geos` selects the reentrant handler API, `geos-legacy` the pre-3.5 one.
//! With both enabled the legacy backend is used, matching what a GEOS < 3.5
//! install can actually provide.

#[cfg(feature = "geos-legacy")]
pub mod legacy;
#[cfg(feature = "geos")]
pub mod reentrant;
pub mod sys;

use std::ffi::CStr;
use std::os::raw::c_char;

#[cfg(feature = "geos-legacy")]
pub use legacy::LegacyGeos;
#[cfg(feature = "geos")]
pub use reentrant::ReentrantGeos;

#[cfg(feature = "geos-legacy")]
pub type NativeGeos = LegacyGeos;
#[cfg(all(feature = "geos", not(feature = "geos-legacy")))]
pub type NativeGeos = ReentrantGeos;

/// `GEOSversion()`, static storage owned by libgeos_c.
pub fn version_ptr() -> *const c_char {
    unsafe { sys::GEOSversion() }
}

pub fn version_string() -> String {
    let ptr = version_ptr();
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
