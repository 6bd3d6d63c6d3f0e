//! Platform-specific pointer injection implementations.
//!
//! The correct implementation is selected at compile time via `#[cfg(target_os = ...)]`.

use std::sync::Arc;

use crate::application::pointer::{InjectionError, PointerInjector};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// Creates the pointer injector for the current platform.
///
/// # Errors
///
/// Returns [`InjectionError::UnsupportedPlatform`] on platforms without an
/// injector implementation.
pub fn platform_injector() -> Result<Arc<dyn PointerInjector>, InjectionError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::SendInputInjector::new()))
    }

    #[cfg(not(target_os = "windows"))]
    {
        Err(InjectionError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}
