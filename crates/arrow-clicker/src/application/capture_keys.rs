//! Keyboard-hook port.
//!
//! A [`KeyboardHook`] subscribes to every key transition on the system and
//! hands each one, synchronously, to a [`KeyEventHandler`].  The handler's
//! [`KeyVerdict`] decides whether the OS delivers the key to other
//! applications.
//!
//! # Why synchronous?
//!
//! The suppression decision must be known before the hook callback returns.
//! Queueing the event and deciding later would mean every arrow key reaches
//! the focused application before we could consume it.

use std::sync::Arc;

use thiserror::Error;

/// Whether a key event is delivered to other applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVerdict {
    /// Let the key through to the rest of the system.
    Allow,
    /// Consume the key.
    Suppress,
}

/// Receiver of raw key transitions.
///
/// Called on the OS hook thread.  Implementations must return quickly and
/// must never panic or block on I/O.
pub trait KeyEventHandler: Send + Sync {
    /// Handles one transition of the key named `key_name`.
    fn on_key(&self, key_name: &str, is_down: bool) -> KeyVerdict;
}

/// Error type for keyboard hook operations.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to install keyboard hook: {0}")]
    InstallFailed(String),
    #[error("keyboard hook is already installed")]
    AlreadyInstalled,
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// A process-wide keyboard subscription with suppression capability.
///
/// The production implementation uses `WH_KEYBOARD_LL`; tests use
/// [`MockKeyboardHook`](crate::infrastructure::keyboard_hook::mock::MockKeyboardHook).
pub trait KeyboardHook: Send + Sync {
    /// Installs the hook; every subsequent key transition goes to `handler`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] if the OS refuses the hook or one is already
    /// installed.
    fn install(&self, handler: Arc<dyn KeyEventHandler>) -> Result<(), HookError>;

    /// Removes the hook and drops the handler.  Idempotent.
    fn uninstall(&self);
}
