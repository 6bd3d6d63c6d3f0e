//! Mock keyboard hook for unit and integration testing.
//!
//! Allows tests to deliver synthetic key transitions to the installed
//! handler, exactly as the OS hook thread would, and to observe the verdict.

use std::sync::{Arc, Mutex};

use crate::application::capture_keys::{HookError, KeyEventHandler, KeyVerdict, KeyboardHook};

/// A mock implementation of [`KeyboardHook`].
#[derive(Default)]
pub struct MockKeyboardHook {
    handler: Mutex<Option<Arc<dyn KeyEventHandler>>>,
    install_count: Mutex<u32>,
    fail_install: bool,
}

impl MockKeyboardHook {
    /// Creates a hook whose `install` succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hook whose `install` always fails.
    pub fn failing() -> Self {
        Self {
            fail_install: true,
            ..Self::default()
        }
    }

    /// Delivers one key transition to the installed handler.
    ///
    /// Returns `None` when no handler is installed (the key would reach the
    /// system untouched).
    pub fn send(&self, key_name: &str, is_down: bool) -> Option<KeyVerdict> {
        let handler = self.handler.lock().expect("lock poisoned").clone();
        handler.map(|h| h.on_key(key_name, is_down))
    }

    /// Delivers a key-down.
    pub fn press(&self, key_name: &str) -> Option<KeyVerdict> {
        self.send(key_name, true)
    }

    /// Delivers a key-up.
    pub fn release(&self, key_name: &str) -> Option<KeyVerdict> {
        self.send(key_name, false)
    }

    /// Returns whether a handler is currently installed.
    pub fn is_installed(&self) -> bool {
        self.handler.lock().expect("lock poisoned").is_some()
    }

    /// Returns the number of successful `install` calls.
    pub fn install_count(&self) -> u32 {
        *self.install_count.lock().expect("lock poisoned")
    }
}

impl KeyboardHook for MockKeyboardHook {
    fn install(&self, handler: Arc<dyn KeyEventHandler>) -> Result<(), HookError> {
        if self.fail_install {
            return Err(HookError::InstallFailed("mock failure".into()));
        }
        let mut slot = self.handler.lock().expect("lock poisoned");
        if slot.is_some() {
            return Err(HookError::AlreadyInstalled);
        }
        *slot = Some(handler);
        *self.install_count.lock().expect("lock poisoned") += 1;
        Ok(())
    }

    fn uninstall(&self) {
        *self.handler.lock().expect("lock poisoned") = None;
    }
}
