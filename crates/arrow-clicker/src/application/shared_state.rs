//! The shared, lock-guarded [`InputState`] handle.
//!
//! One coarse mutex protects the whole aggregate.  Every critical section is
//! a handful of field writes, so contention between the hook thread and the
//! two periodic tasks is negligible, and a mode flip plus its release
//! protocol is a single atomic unit for every observer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arrow_clicker_core::InputState;

/// Handle to the process-wide input state.
#[derive(Debug, Clone, Default)]
pub struct SharedInputState {
    inner: Arc<Mutex<InputState>>,
}

impl SharedInputState {
    /// Creates a fresh startup state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the state.
    ///
    /// A poisoned lock is recovered rather than propagated: the keyboard hook
    /// must never panic, and every `InputState` method leaves the record
    /// consistent even if a previous holder panicked mid-call.
    pub fn lock(&self) -> MutexGuard<'_, InputState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current state, for diagnostics and tests.
    pub fn snapshot(&self) -> InputState {
        self.lock().clone()
    }
}
