//! Test doubles: a thread-local log capture and an in-process stand-in for
//! the GEOS handler registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_void, CString};
use std::ptr::NonNull;
use std::rc::Rc;
use std::sync::Once;

use log::{Level, Log, Metadata, Record};

use crate::api::GeosApi;
use crate::generation::ApiGeneration;
use crate::state::DiagnosticState;
use crate::trampoline::{self, LegacyHandler, ReentrantHandler};

#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static CAPTURED: RefCell<Vec<Captured>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            c.borrow_mut().push(Captured {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            })
        });
    }

    fn flush(&self) {}
}

/// Install the capturing logger and clear this thread's captured records.
pub fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = log::set_logger(&CaptureLogger);
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

/// Records captured on this thread since the last `capture_logs`.
pub fn captured() -> Vec<Captured> {
    CAPTURED.with(|c| c.borrow().clone())
}

#[derive(Debug, Clone, Copy)]
enum Handlers {
    Reentrant {
        notice: ReentrantHandler,
        error: ReentrantHandler,
        userdata: *mut c_void,
    },
    Legacy {
        notice: LegacyHandler,
        error: LegacyHandler,
    },
}

#[derive(Debug, Default)]
struct Registry {
    next: usize,
    live: HashMap<usize, Handlers>,
    finished: usize,
}

/// Behaves like GEOS towards its handlers: stores the registered function
/// pointers per context and invokes them the way GEOS raises messages.
#[derive(Debug, Clone)]
pub struct FakeGeos {
    generation: ApiGeneration,
    fail_init: bool,
    registry: Rc<RefCell<Registry>>,
}

impl FakeGeos {
    pub fn new(generation: ApiGeneration) -> Self {
        Self {
            generation,
            fail_init: false,
            registry: Rc::default(),
        }
    }

    pub fn failing(generation: ApiGeneration) -> Self {
        Self {
            fail_init: true,
            ..Self::new(generation)
        }
    }

    pub fn live(&self) -> usize {
        self.registry.borrow().live.len()
    }

    pub fn finished(&self) -> usize {
        self.registry.borrow().finished
    }

    fn handlers(&self, handle: usize) -> Handlers {
        self.registry.borrow().live[&handle]
    }

    pub fn raise_notice(&self, handle: usize, message: &str) {
        self.raise(handle, message, true);
    }

    pub fn raise_error(&self, handle: usize, message: &str) {
        self.raise(handle, message, false);
    }

    fn raise(&self, handle: usize, message: &str, notice: bool) {
        let message = CString::new(message).unwrap();
        let fmt = CString::new("%s").unwrap();
        unsafe {
            match self.handlers(handle) {
                Handlers::Reentrant {
                    notice: n,
                    error: e,
                    userdata,
                } => {
                    let f = if notice { n } else { e };
                    f(message.as_ptr(), userdata);
                }
                Handlers::Legacy { notice: n, error: e } => {
                    let f = if notice { n } else { e };
                    f(fmt.as_ptr(), message.as_ptr());
                }
            }
        }
    }
}

impl GeosApi for FakeGeos {
    type Handle = usize;

    fn generation(&self) -> ApiGeneration {
        self.generation
    }

    fn version(&self) -> String {
        match self.generation {
            ApiGeneration::Legacy => "3.4.2-CAPI-1.8.2".to_string(),
            ApiGeneration::Reentrant => "3.11.1-CAPI-1.17.1".to_string(),
        }
    }

    unsafe fn init(&self, state: NonNull<DiagnosticState>) -> Option<usize> {
        if self.fail_init {
            return None;
        }
        let handlers = match self.generation {
            ApiGeneration::Reentrant => Handlers::Reentrant {
                notice: trampoline::reentrant_notice,
                error: trampoline::reentrant_error,
                userdata: state.as_ptr().cast(),
            },
            ApiGeneration::Legacy => Handlers::Legacy {
                notice: trampoline::legacy_notice,
                error: trampoline::legacy_error,
            },
        };
        let mut registry = self.registry.borrow_mut();
        registry.next += 1;
        let handle = registry.next;
        registry.live.insert(handle, handlers);
        Some(handle)
    }

    unsafe fn finish(&self, handle: usize) {
        let mut registry = self.registry.borrow_mut();
        if registry.live.remove(&handle).is_some() {
            registry.finished += 1;
        }
    }
}
