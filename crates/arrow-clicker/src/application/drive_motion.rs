//! The two periodic tasks: the control loop and the motion driver.
//!
//! - The **control loop** recomputes every direction's speed from the held
//!   set once per tick ([`advance_speeds`]).
//! - The **motion driver** reads the speeds once per tick and injects one
//!   relative pointer move when the rounded delta is non-zero
//!   ([`MotionDriver::tick`]).
//!
//! Both loops run on a [`tokio::time::interval`] with missed ticks skipped,
//! and check the shared running flag at every wake.  When the flag is
//! cleared they run the release protocol before exiting, so a shutdown in
//! the middle of a drag never leaves a button pressed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arrow_clicker_core::{MotionParams, RoundingPolicy};
use tokio::time::MissedTickBehavior;

use super::pointer::PointerInjector;
use super::shared_state::SharedInputState;
use super::toggle_mode::ModeController;

/// Tick period shared by both periodic tasks.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(5);

/// Runs one control-loop tick.
pub fn advance_speeds(state: &SharedInputState, params: &MotionParams) {
    state.lock().advance_speeds(params);
}

/// Converts speeds into pointer motion.
pub struct MotionDriver {
    state: SharedInputState,
    injector: Arc<dyn PointerInjector>,
    rounding: RoundingPolicy,
}

impl MotionDriver {
    pub fn new(
        state: SharedInputState,
        injector: Arc<dyn PointerInjector>,
        rounding: RoundingPolicy,
    ) -> Self {
        Self {
            state,
            injector,
            rounding,
        }
    }

    /// Runs one motion tick.
    ///
    /// Returns the `(dx, dy)` that was injected, or `None` when the pointer
    /// is at rest, the state is in pass-through mode, or injection failed.
    pub fn tick(&self) -> Option<(i32, i32)> {
        let (dx, dy) = {
            let state = self.state.lock();
            if !state.is_pointer_control() {
                return None;
            }
            state.motion_delta()
        };
        let (dx, dy) = (self.rounding.apply(dx), self.rounding.apply(dy));
        if dx == 0 && dy == 0 {
            return None;
        }
        match self.injector.move_relative(dx, dy) {
            Ok(()) => {
                tracing::trace!(dx, dy, "pointer moved");
                Some((dx, dy))
            }
            Err(e) => {
                tracing::debug!(dx, dy, "pointer move dropped: {e}");
                None
            }
        }
    }
}

/// Drives the control loop until `running` is cleared.
pub async fn run_control_loop(
    state: SharedInputState,
    params: MotionParams,
    period: Duration,
    running: Arc<AtomicBool>,
    modes: Arc<ModeController>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if !running.load(Ordering::Acquire) {
            break;
        }
        advance_speeds(&state, &params);
    }
    modes.release_all();
    tracing::debug!("control loop stopped");
}

/// Drives the motion driver until `running` is cleared.
pub async fn run_motion_loop(
    driver: MotionDriver,
    period: Duration,
    running: Arc<AtomicBool>,
    modes: Arc<ModeController>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if !running.load(Ordering::Acquire) {
            break;
        }
        driver.tick();
    }
    modes.release_all();
    tracing::debug!("motion loop stopped");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
