//! arrow-clicker library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does arrow-clicker do? (for beginners)
//!
//! It lets you use the mouse without a mouse:
//!
//! 1. A global low-level keyboard hook sees every key press on the system.
//! 2. For each key the [`application::route_keys::KeyEventRouter`] decides,
//!    synchronously, whether the key is consumed (arrow keys, left Ctrl /
//!    Win / Alt in pointer-control mode) or passed on to other programs.
//! 3. Two periodic tasks run every 5 ms: one accelerates the speed of each
//!    held arrow direction, the other injects relative pointer motion.
//! 4. Right Shift toggles pointer-control mode on and off.

/// Application layer: routing, mode control, motion, and engine lifecycle.
pub mod application;

/// Infrastructure layer: OS hook, pointer injection, and config storage.
pub mod infrastructure;
