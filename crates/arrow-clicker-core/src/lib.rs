//! # arrow-clicker-core
//!
//! Shared library for Arrow Clicker containing the input-state aggregate,
//! the pointer motion model, and the key-name alias tables.
//!
//! This crate has zero dependencies on OS APIs, async runtimes, or threads.
//!
//! # Architecture overview (for beginners)
//!
//! Arrow Clicker turns the keyboard into a mouse: the arrow keys move the
//! pointer with acceleration, and three left-hand modifier keys act as the
//! left, middle, and right mouse buttons.  Right Shift toggles between
//! *pointer-control* mode (keys drive the mouse) and *pass-through* mode
//! (keys behave normally).
//!
//! This crate (`arrow-clicker-core`) is the pure foundation.  It defines:
//!
//! - **`domain`** – The [`InputState`] record shared between the key hook and
//!   the periodic motion tasks, its invariants, and the speed curve applied
//!   on every tick.
//!
//! - **`keymap`** – Which raw key names the tool owns, and how a Windows
//!   Virtual Key code is turned into one of those names.

pub mod domain;
pub mod keymap;

pub use domain::input_state::{Button, Direction, InputState, Mode, ToggleState};
pub use domain::motion::{next_speed, MotionParams, RoundingPolicy};
pub use keymap::{resolve_key, KeyRole};
