//! Keyboard hook infrastructure.
//!
//! On Windows, this installs a low-level keyboard hook (`WH_KEYBOARD_LL`) on
//! a dedicated Win32 message-loop thread.  Unlike a capture-and-forward
//! design, the hook procedure calls the
//! [`KeyEventHandler`](crate::application::capture_keys::KeyEventHandler)
//! directly so the allow/suppress verdict is known before the callback
//! returns.
//!
//! # Windows-Specific Implementation
//!
//! The hook callback must complete within the system's `LowLevelHooksTimeout`
//! (a few hundred milliseconds) or Windows silently removes the hook.  The
//! router only takes a short mutex and makes non-blocking `SendInput` calls.
//!
//! # Testability
//!
//! [`mock::MockKeyboardHook`] lets tests feed synthetic key transitions to
//! the installed handler without OS hooks.

use std::sync::Arc;

use crate::application::capture_keys::{HookError, KeyboardHook};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// Creates the keyboard hook for the current platform.
///
/// # Errors
///
/// Returns [`HookError::UnsupportedPlatform`] on platforms without a hook
/// implementation.
pub fn platform_hook() -> Result<Arc<dyn KeyboardHook>, HookError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsKeyboardHook::new()))
    }

    #[cfg(not(target_os = "windows"))]
    {
        Err(HookError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}
