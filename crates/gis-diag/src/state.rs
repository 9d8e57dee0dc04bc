use std::cell::{Cell, RefCell};
use std::os::raw::c_char;

use crate::buffer::ErrorBuffer;
use crate::config::{BridgeConfig, NoticePolicy};

/// `log` target used for everything the bridge emits.
pub const LOG_TARGET: &str = "gis";

/// Per-context diagnostic state that GEOS callbacks write into.
///
/// Owned by a single context and only ever touched from the thread that
/// drives it. The type is deliberately not `Sync`:
///
/// ```compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<gis_diag::DiagnosticState>();
/// ```
#[derive(Debug)]
pub struct DiagnosticState {
    last_error: RefCell<ErrorBuffer>,
    policy: NoticePolicy,
    tag: String,
    notices: Cell<u64>,
    errors: Cell<u64>,
}

impl Default for DiagnosticState {
    fn default() -> Self {
        Self::new(&BridgeConfig::default())
    }
}

impl DiagnosticState {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            last_error: RefCell::new(ErrorBuffer::new()),
            policy: config.notice_policy,
            tag: config.tag.clone(),
            notices: Cell::new(0),
            errors: Cell::new(0),
        }
    }

    pub fn policy(&self) -> NoticePolicy {
        self.policy
    }

    /// Handle a GEOS notice: forward it to the log at WARN and, if the policy
    /// says so, record it as the last error.
    pub fn notice(&self, message: &str) {
        self.notices.set(self.notices.get() + 1);
        if self.policy.records() {
            self.record(message);
        }
        log::warn!(target: LOG_TARGET, "{}{}", self.tag, message);
    }

    /// Handle a GEOS error: record it as the last error. Nothing is logged.
    pub fn error(&self, message: &str) {
        self.errors.set(self.errors.get() + 1);
        self.record(message);
    }

    fn record(&self, message: &str) {
        // No borrow of the buffer outlives a method call.
        self.last_error.borrow_mut().set(message);
    }

    /// Copy of the current last error, empty if none was reported.
    pub fn last_error(&self) -> String {
        self.last_error.borrow().as_str().to_string()
    }

    /// Terminated last error for C callers, valid until the next error
    /// callback on this state.
    pub fn last_error_ptr(&self) -> *const c_char {
        self.last_error.borrow().as_ptr()
    }

    pub fn clear(&self) {
        self.last_error.borrow_mut().clear();
    }

    /// Take the last error out of the buffer, leaving it empty.
    pub fn take_error(&self) -> Option<String> {
        let mut buf = self.last_error.borrow_mut();
        if buf.is_empty() {
            return None;
        }
        let message = buf.as_str().to_string();
        buf.clear();
        Some(message)
    }

    pub fn notice_count(&self) -> u64 {
        self.notices.get()
    }

    pub fn error_count(&self) -> u64 {
        self.errors.get()
    }
}
