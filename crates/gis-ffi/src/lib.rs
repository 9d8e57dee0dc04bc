//! C ABI of tarantool-gis's native helpers.
//!
//! Exposes GEOS context setup with notice/error capture, the last captured
//! error, and the GEOS and PROJ version strings. Which symbols exist depends
//! on the `geos`, `geos-legacy`, `proj` and `tarantool` features.

pub mod error;
#[cfg(any(feature = "geos", feature = "geos-legacy"))]
mod context;
#[cfg(any(feature = "geos", feature = "geos-legacy"))]
pub mod geos;
pub mod proj;
pub mod say;

#[cfg(any(feature = "geos", feature = "geos-legacy"))]
pub use context::GisGeosContext;
pub use error::{catch_panic, drop_boxed, set_last_error};

use std::os::raw::c_char;

/// Last bridge-level failure on this thread (for example a failed
/// `gis_geos_init`), or an empty string.
///
/// The pointer stays valid until the next failure on the same thread. Do not
/// free it.
#[no_mangle]
pub extern "C" fn gis_ffi_last_error() -> *const c_char {
    error::last_error_ptr()
}

/// Create a GEOS context with notice and error handlers installed.
///
/// Returns null if GEOS could not allocate a context; the reason is then
/// available from `gis_ffi_last_error`. Release with `gis_geos_finish`.
/// With the `tarantool` feature this also installs the `say()` logger, so
/// GEOS notices reach the host log.
#[cfg(any(feature = "geos", feature = "geos-legacy"))]
#[no_mangle]
pub extern "C" fn gis_geos_init() -> *mut GisGeosContext {
    #[cfg(feature = "tarantool")]
    say::init();
    catch_panic(std::ptr::null_mut(), || match GisGeosContext::new() {
        Ok(ctx) => Box::into_raw(Box::new(ctx)),
        Err(e) => {
            set_last_error(e.to_string());
            std::ptr::null_mut()
        }
    })
}

/// Finish a context created by `gis_geos_init`. Null is a no-op.
///
/// # Safety
/// `ctx` must be null or a pointer returned by `gis_geos_init` that has not
/// been finished yet.
#[cfg(any(feature = "geos", feature = "geos-legacy"))]
#[no_mangle]
pub unsafe extern "C" fn gis_geos_finish(ctx: *mut GisGeosContext) {
    error::drop_boxed(ctx);
}

/// Raw `GEOSContextHandle_t` for passing to GEOS `_r` functions.
///
/// # Safety
/// `ctx` must be null or a live pointer from `gis_geos_init`.
#[cfg(any(feature = "geos", feature = "geos-legacy"))]
#[no_mangle]
pub unsafe extern "C" fn gis_geos_handle(ctx: *const GisGeosContext) -> *mut std::os::raw::c_void {
    match ctx.as_ref() {
        Some(ctx) => ctx.inner.handle().as_ptr().cast(),
        None => std::ptr::null_mut(),
    }
}

/// Most recent GEOS error reported on `ctx`, or an empty string.
///
/// Valid until the next GEOS error on the same context or until
/// `gis_geos_finish`. A null `ctx` yields `gis_ffi_last_error()`.
///
/// # Safety
/// `ctx` must be null or a live pointer from `gis_geos_init`.
#[cfg(any(feature = "geos", feature = "geos-legacy"))]
#[no_mangle]
pub unsafe extern "C" fn gis_geos_last_error(ctx: *const GisGeosContext) -> *const c_char {
    match ctx.as_ref() {
        Some(ctx) => ctx.inner.last_error_ptr(),
        None => error::last_error_ptr(),
    }
}

/// `GEOSversion()` of the linked library.
#[cfg(any(feature = "geos", feature = "geos-legacy"))]
#[no_mangle]
pub extern "C" fn gis_geos_version() -> *const c_char {
    geos::version_ptr()
}

/// Release string of the linked PROJ library, e.g. `"Rel. 9.2.0, March 1st, 2023"`.
#[cfg(feature = "proj")]
#[no_mangle]
pub extern "C" fn gis_proj_version() -> *const c_char {
    proj::release_ptr()
}

/// Route `log` output (GEOS notices included) to Tarantool's `say()`.
/// Safe to call from every entry point.
#[cfg(feature = "tarantool")]
#[no_mangle]
pub extern "C" fn gis_logging_init() {
    say::init();
}
