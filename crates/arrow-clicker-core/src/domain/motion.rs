//! Pointer motion model: per-tick acceleration with a hard ceiling.
//!
//! Speeds are expressed in pixels per tick.  A held direction starts at
//! [`STEP_SIZE`], then grows geometrically by [`ACCEL_FACTOR`] each tick
//! until it reaches the configured maximum.  Releasing the key stops the
//! direction instantly; there is no deceleration ramp.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Initial speed applied on the first tick a direction is held.
pub const STEP_SIZE: f64 = 10.0;

/// Multiplier applied to a held direction's speed every tick.
pub const ACCEL_FACTOR: f64 = 1.05;

/// Speed ceiling used when no configuration is available.
pub const DEFAULT_MAX_SPEED: u32 = 30;

/// Errors raised when building [`MotionParams`].
#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    #[error("max speed must be a positive integer, got {0}")]
    InvalidMaxSpeed(u32),
}

/// Computes a direction's speed for the next tick.
///
/// - not held: `0`
/// - held and at rest: `step`
/// - held and moving: `min(current * accel, max_speed)`
///
/// The result is always within `[0, max_speed]`, even if `step` exceeds
/// `max_speed`.
pub fn next_speed(current: f64, held: bool, max_speed: f64, step: f64, accel: f64) -> f64 {
    if !held {
        return 0.0;
    }
    let next = if current <= 0.0 { step } else { current * accel };
    next.clamp(0.0, max_speed)
}

/// Parameters of the acceleration curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub max_speed: f64,
    pub step: f64,
    pub accel: f64,
}

impl MotionParams {
    /// Builds the standard curve with the given ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidMaxSpeed`] when `max_speed` is zero.
    pub fn with_max_speed(max_speed: u32) -> Result<Self, MotionError> {
        if max_speed == 0 {
            return Err(MotionError::InvalidMaxSpeed(max_speed));
        }
        Ok(Self {
            max_speed: f64::from(max_speed),
            ..Self::default()
        })
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            max_speed: f64::from(DEFAULT_MAX_SPEED),
            step: STEP_SIZE,
            accel: ACCEL_FACTOR,
        }
    }
}

/// How fractional per-tick deltas become integer pixel offsets.
///
/// [`RoundingPolicy::Truncate`] reproduces the historical behaviour of
/// dropping the fraction toward zero.  [`RoundingPolicy::Round`] picks the
/// nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    #[default]
    Round,
    Truncate,
}

impl RoundingPolicy {
    /// Converts a fractional delta to whole pixels.
    pub fn apply(self, delta: f64) -> i32 {
        let whole = match self {
            RoundingPolicy::Round => delta.round(),
            RoundingPolicy::Truncate => delta.trunc(),
        };
        // `as` saturates on overflow; deltas are bounded by max_speed anyway.
        whole as i32
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
