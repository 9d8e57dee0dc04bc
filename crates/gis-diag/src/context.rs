use std::os::raw::c_char;
use std::ptr::NonNull;

use crate::api::GeosApi;
use crate::config::BridgeConfig;
use crate::error::{GisError, Result};
use crate::generation::ApiGeneration;
use crate::state::{DiagnosticState, LOG_TARGET};
use crate::trampoline;

/// An initialized GEOS context together with the diagnostic state its
/// handlers write into. Finishes the native context on drop.
///
/// Create one per fiber or other logical caller; the context is not `Sync`.
#[derive(Debug)]
pub struct GeosContext<A: GeosApi> {
    api: A,
    handle: A::Handle,
    // Boxed so the address given to GEOS as userdata never moves.
    state: Box<DiagnosticState>,
}

impl<A: GeosApi> GeosContext<A> {
    /// Initialize a native context and register both message handlers.
    ///
    /// # Errors
    /// Returns `GisError::InitFailed` if GEOS returns a null context.
    pub fn new(api: A, config: &BridgeConfig) -> Result<Self> {
        let state = Box::new(DiagnosticState::new(config));
        let ptr = NonNull::from(state.as_ref());
        let generation = api.generation();

        if generation == ApiGeneration::Legacy {
            trampoline::bind_legacy(ptr);
        }
        // SAFETY: `state` is boxed and owned by the returned context, which
        // finishes the handle before the box is dropped.
        let handle = match unsafe { api.init(ptr) } {
            Some(handle) => handle,
            None => {
                trampoline::unbind_legacy(ptr);
                return Err(GisError::InitFailed { generation });
            }
        };

        log::debug!(
            target: LOG_TARGET,
            "{} GEOS context initialized ({}), notice policy {:?}",
            generation,
            api.version(),
            config.notice_policy
        );
        Ok(Self { api, handle, state })
    }

    pub fn handle(&self) -> A::Handle {
        self.handle
    }

    pub fn generation(&self) -> ApiGeneration {
        self.api.generation()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &DiagnosticState {
        &self.state
    }

    /// Copy of the most recent error reported on this context, empty if none.
    pub fn last_error(&self) -> String {
        self.state.last_error()
    }

    pub fn last_error_ptr(&self) -> *const c_char {
        self.state.last_error_ptr()
    }

    /// Run a fallible GEOS call and turn its failure into a `GisError`.
    ///
    /// The last error is cleared first. `f` returns `None` when GEOS signals
    /// failure through its own return contract (null pointer, 2 for
    /// predicates, 0 for most int results); the message captured by the
    /// error handler becomes `GisError::Native`.
    ///
    /// # Errors
    /// Returns `GisError::Native` when `f` returns `None`.
    pub fn call<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(A::Handle) -> Option<T>,
    {
        self.state.clear();
        match f(self.handle) {
            Some(value) => Ok(value),
            None => Err(GisError::Native(
                self.state
                    .take_error()
                    .unwrap_or_else(|| "unknown GEOS error".to_string()),
            )),
        }
    }

    /// Finish the native context now. Equivalent to dropping it.
    pub fn finish(self) {
        drop(self);
    }
}

impl<A: GeosApi> Drop for GeosContext<A> {
    fn drop(&mut self) {
        // SAFETY: `handle` came from `init` and is finished exactly once here.
        unsafe { self.api.finish(self.handle) };
        if self.api.generation() == ApiGeneration::Legacy {
            trampoline::unbind_legacy(NonNull::from(self.state.as_ref()));
        }
        log::debug!(target: LOG_TARGET, "{} GEOS context finished", self.api.generation());
    }
}
