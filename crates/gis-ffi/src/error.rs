use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe, UnwindSafe};

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

/// Store a bridge-level failure (no context available) for `gis_ffi_last_error`.
pub fn set_last_error(msg: String) {
    log::error!(target: gis_diag::LOG_TARGET, "{}", msg);
    let msg = c_string_until_nul(msg);
    LAST_ERROR.with(|e| *e.borrow_mut() = msg);
}

/// `msg` as a C string, cut at the first interior NUL.
pub fn c_string_until_nul(msg: String) -> CString {
    CString::new(msg).unwrap_or_else(|e| {
        let nul = e.nul_position();
        let mut bytes = e.into_vec();
        bytes.truncate(nul);
        CString::new(bytes).unwrap_or_default()
    })
}

/// Pointer to this thread's last bridge-level error, empty if none. Valid
/// until the next failure on the same thread.
pub fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|e| e.borrow().as_ptr())
}

/// Run `f`, turning a panic into `fallback` so it never unwinds into C.
pub fn catch_panic<T, F: FnOnce() -> T + UnwindSafe>(fallback: T, f: F) -> T {
    match catch_unwind(f) {
        Ok(value) => value,
        Err(_) => {
            set_last_error("internal panic".to_string());
            fallback
        }
    }
}

/// Drop a value previously leaked with `Box::into_raw`, without letting a
/// panic in its destructor unwind into C. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or come from `Box::into_raw` and not be freed yet.
pub unsafe fn drop_boxed<T>(ptr: *mut T) {
    if ptr.is_null() {
        return;
    }
    catch_panic((), AssertUnwindSafe(|| drop(Box::from_raw(ptr))));
}
