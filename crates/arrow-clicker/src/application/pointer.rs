//! Pointer-injection port.
//!
//! The application layer emits mouse actions through [`PointerInjector`].
//! The Windows implementation lives in the infrastructure layer; tests use
//! the recording mock or a `mockall` double.

use arrow_clicker_core::Button;
use thiserror::Error;

/// Error type for pointer injection.
///
/// Injection is best-effort: callers log these and move on.  The next motion
/// tick naturally re-attempts movement.
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Platform-agnostic pointer injection.
///
/// Implementations must not block: they are called from the keyboard hook
/// callback and from the 5 ms motion task.
#[cfg_attr(test, mockall::automock)]
pub trait PointerInjector: Send + Sync {
    /// Moves the pointer by `(dx, dy)` pixels relative to its current position.
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), InjectionError>;

    /// Presses (`down = true`) or releases a mouse button.
    fn button(&self, button: Button, down: bool) -> Result<(), InjectionError>;
}

/// Injects a button transition, logging and discarding any failure.
pub(crate) fn emit_button(injector: &dyn PointerInjector, button: Button, down: bool) {
    match injector.button(button, down) {
        Ok(()) => tracing::debug!(?button, down, "button injected"),
        Err(e) => tracing::warn!(?button, down, "button injection failed: {e}"),
    }
}
