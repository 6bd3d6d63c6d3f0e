//! Domain entities for Arrow Clicker.
//!
//! This module contains pure logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application.  Domain code has **no** imports
//! from OS APIs or runtimes, so every rule here (speed clamping, debounce,
//! the release protocol) can be unit-tested on any machine without a real
//! keyboard hook.

/// The shared input-state aggregate and its invariants.
pub mod input_state;

/// The per-tick acceleration curve and delta rounding.
pub mod motion;
