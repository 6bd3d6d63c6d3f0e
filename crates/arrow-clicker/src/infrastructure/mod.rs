//! Infrastructure layer.
//!
//! Contains OS-facing adapters: the global keyboard hook, pointer injection,
//! and config file storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `arrow_clicker_core`, but MUST NOT be imported by the `application` or
//! domain layers (test modules excepted).

pub mod keyboard_hook;
pub mod pointer_injection;
pub mod storage;
