use std::fmt::Debug;
use std::ptr::NonNull;

use crate::generation::ApiGeneration;
use crate::state::DiagnosticState;

/// Capability contract of a GEOS C API generation: create a context with the
/// notice and error handlers registered, and tear it down again.
///
/// Implementations wire GEOS's handlers to the trampolines in
/// [`crate::trampoline`]. Legacy implementations rely on the caller having
/// bound the state with [`crate::trampoline::bind_legacy`];
/// [`crate::GeosContext`] takes care of that.
pub trait GeosApi: Debug {
    /// Native context handle handed back to geometry calls.
    type Handle: Copy + Debug;

    fn generation(&self) -> ApiGeneration;

    /// Version string reported by the linked library.
    fn version(&self) -> String;

    /// Create a native context whose notices and errors land in `state`.
    ///
    /// Returns `None` if the library could not allocate a context.
    ///
    /// # Safety
    /// `state` must stay alive and must not move until [`GeosApi::finish`]
    /// has been called with the returned handle.
    unsafe fn init(&self, state: NonNull<DiagnosticState>) -> Option<Self::Handle>;

    /// Release a context created by [`GeosApi::init`].
    ///
    /// # Safety
    /// `handle` must come from `init` on this backend and be finished once.
    unsafe fn finish(&self, handle: Self::Handle);
}
