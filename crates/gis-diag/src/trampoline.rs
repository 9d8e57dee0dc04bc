//! `extern "C"` message handlers registered with GEOS.
//!
//! Reentrant handlers receive the owning [`DiagnosticState`] through the
//! userdata pointer. Legacy handlers get no userdata, so they write into the
//! state most recently bound on the calling thread with [`bind_legacy`] and
//! not yet unbound.

use std::borrow::Cow;
use std::cell::RefCell;
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr::{self, NonNull};

use crate::state::DiagnosticState;

/// `GEOSMessageHandler_r`.
pub type ReentrantHandler = unsafe extern "C" fn(message: *const c_char, userdata: *mut c_void);

/// `GEOSMessageHandler`, viewed through its first variadic argument.
///
/// GEOS raises legacy messages as `("%s", text)`; the second parameter picks
/// up `text` from the variadic slot on the C calling conventions GEOS ships
/// for (x86-64 SysV, AArch64 Linux).
pub type LegacyHandler = unsafe extern "C" fn(fmt: *const c_char, arg: *const c_char);

thread_local! {
    // Innermost binding last; earlier contexts take over when it unbinds.
    static LEGACY_TARGETS: RefCell<Vec<*const DiagnosticState>> = const { RefCell::new(Vec::new()) };
}

/// Route legacy GEOS messages raised on this thread into `state`.
pub fn bind_legacy(state: NonNull<DiagnosticState>) {
    LEGACY_TARGETS.with(|t| t.borrow_mut().push(state.as_ptr()));
}

/// Remove `state` from this thread's routing; the previously bound state,
/// if any, receives legacy messages again.
pub fn unbind_legacy(state: NonNull<DiagnosticState>) {
    LEGACY_TARGETS.with(|t| {
        let mut targets = t.borrow_mut();
        if let Some(pos) = targets.iter().rposition(|&p| ptr::eq(p, state.as_ptr())) {
            targets.remove(pos);
        }
    });
}

pub fn legacy_bound() -> bool {
    LEGACY_TARGETS.with(|t| !t.borrow().is_empty())
}

unsafe fn text<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(ptr).to_string_lossy()
    }
}

/// Resolve a legacy `(fmt, arg)` pair to message text.
unsafe fn legacy_text<'a>(fmt: *const c_char, arg: *const c_char) -> Cow<'a, str> {
    if fmt.is_null() {
        return Cow::Borrowed("");
    }
    if CStr::from_ptr(fmt).to_bytes() == b"%s" {
        text(arg)
    } else {
        text(fmt)
    }
}

fn guarded<F: FnOnce()>(f: F) {
    // Unwinding into GEOS would abort the host.
    let _ = catch_unwind(AssertUnwindSafe(f));
}

unsafe fn with_userdata<F: FnOnce(&DiagnosticState)>(userdata: *mut c_void, f: F) {
    if let Some(state) = (userdata as *const DiagnosticState).as_ref() {
        f(state);
    }
}

fn with_legacy_target<F: FnOnce(&DiagnosticState)>(f: F) {
    let target = LEGACY_TARGETS.with(|t| t.borrow().last().copied());
    // SAFETY: the owning context unbinds before its state is freed.
    if let Some(state) = target.and_then(|p| unsafe { p.as_ref() }) {
        f(state);
    }
}

/// Notice handler for the reentrant API.
///
/// # Safety
/// `message` must be null or a valid C string, `userdata` null or a live
/// `DiagnosticState`.
pub unsafe extern "C" fn reentrant_notice(message: *const c_char, userdata: *mut c_void) {
    guarded(|| with_userdata(userdata, |state| state.notice(&text(message))));
}

/// Error handler for the reentrant API.
///
/// # Safety
/// Same contract as [`reentrant_notice`].
pub unsafe extern "C" fn reentrant_error(message: *const c_char, userdata: *mut c_void) {
    guarded(|| with_userdata(userdata, |state| state.error(&text(message))));
}

/// Notice handler for the legacy API.
///
/// # Safety
/// `fmt` and `arg` must be null or valid C strings.
pub unsafe extern "C" fn legacy_notice(fmt: *const c_char, arg: *const c_char) {
    guarded(|| with_legacy_target(|state| state.notice(&legacy_text(fmt, arg))));
}

/// Error handler for the legacy API.
///
/// # Safety
/// Same contract as [`legacy_notice`].
pub unsafe extern "C" fn legacy_error(fmt: *const c_char, arg: *const c_char) {
    guarded(|| with_legacy_target(|state| state.error(&legacy_text(fmt, arg))));
}
