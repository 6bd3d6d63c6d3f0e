//! PointerEngine: the start/stop lifecycle.
//!
//! # Architecture
//!
//! ```text
//! PointerEngine::start()
//!  ├─ KeyboardHook::install(KeyEventRouter)   -- OS hook thread, synchronous verdicts
//!  ├─ run_control_loop   (Tokio task, 5 ms)   -- speeds from held directions
//!  └─ run_motion_loop    (Tokio task, 5 ms)   -- relative pointer moves
//!
//! RunningEngine::stop()
//!  ├─ clear running flag                      -- both loops exit within one tick
//!  ├─ await both tasks                        -- each runs the release protocol
//!  ├─ KeyboardHook::uninstall()               -- blocking pool, joins the hook thread
//!  └─ release protocol once more              -- covers keys delivered during removal
//! ```
//!
//! The hook is a capability owned by [`RunningEngine`]: it is installed by
//! `start` and removed by `stop`, never left dangling for the process
//! lifetime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arrow_clicker_core::{MotionParams, RoundingPolicy};
use thiserror::Error;
use tokio::task::JoinHandle;

use super::capture_keys::{HookError, KeyEventHandler, KeyboardHook};
use super::drive_motion::{run_control_loop, run_motion_loop, MotionDriver, DEFAULT_DELAY};
use super::pointer::PointerInjector;
use super::route_keys::KeyEventRouter;
use super::shared_state::SharedInputState;
use super::toggle_mode::ModeController;

/// Error type for the engine lifecycle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("keyboard hook error: {0}")]
    Hook(#[from] HookError),
    #[error("no Tokio runtime available to spawn the motion tasks")]
    NoRuntime,
    #[error("periodic task failed: {0}")]
    TaskFailed(String),
}

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub motion: MotionParams,
    pub rounding: RoundingPolicy,
    /// Tick period of both periodic tasks.
    pub tick: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            motion: MotionParams::default(),
            rounding: RoundingPolicy::default(),
            tick: DEFAULT_DELAY,
        }
    }
}

/// An engine that has not been started yet.
pub struct PointerEngine {
    settings: EngineSettings,
    state: SharedInputState,
    injector: Arc<dyn PointerInjector>,
    hook: Arc<dyn KeyboardHook>,
}

impl PointerEngine {
    pub fn new(
        settings: EngineSettings,
        injector: Arc<dyn PointerInjector>,
        hook: Arc<dyn KeyboardHook>,
    ) -> Self {
        Self {
            settings,
            state: SharedInputState::new(),
            injector,
            hook,
        }
    }

    /// Returns a handle to the engine's input state.
    pub fn state(&self) -> SharedInputState {
        self.state.clone()
    }

    /// Installs the keyboard hook and spawns both periodic tasks.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoRuntime`] outside a runtime, or
    /// [`EngineError::Hook`] if the hook cannot be installed.  Nothing is left
    /// running on error.
    pub fn start(self) -> Result<RunningEngine, EngineError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;

        let modes = Arc::new(ModeController::new(
            self.state.clone(),
            Arc::clone(&self.injector),
        ));
        let router = Arc::new(KeyEventRouter::new(
            self.state.clone(),
            Arc::clone(&self.injector),
            Arc::clone(&modes),
        ));
        self.hook.install(router as Arc<dyn KeyEventHandler>)?;

        let running = Arc::new(AtomicBool::new(true));
        let control = runtime.spawn(run_control_loop(
            self.state.clone(),
            self.settings.motion,
            self.settings.tick,
            Arc::clone(&running),
            Arc::clone(&modes),
        ));
        let driver = MotionDriver::new(
            self.state.clone(),
            Arc::clone(&self.injector),
            self.settings.rounding,
        );
        let motion = runtime.spawn(run_motion_loop(
            driver,
            self.settings.tick,
            Arc::clone(&running),
            Arc::clone(&modes),
        ));

        tracing::info!(
            max_speed = self.settings.motion.max_speed,
            tick_ms = self.settings.tick.as_millis() as u64,
            "pointer engine started"
        );
        Ok(RunningEngine {
            state: self.state,
            hook: self.hook,
            modes,
            running,
            tasks: vec![control, motion],
        })
    }
}

/// A started engine.  Call [`RunningEngine::stop`] to shut it down.
pub struct RunningEngine {
    state: SharedInputState,
    hook: Arc<dyn KeyboardHook>,
    modes: Arc<ModeController>,
    running: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
}

impl RunningEngine {
    /// Returns a handle to the engine's input state.
    pub fn state(&self) -> SharedInputState {
        self.state.clone()
    }

    /// Returns `true` until [`RunningEngine::stop`] is called.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stops both periodic tasks, removes the keyboard hook, and releases
    /// every held button.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TaskFailed`] if a periodic task or the hook
    /// removal panicked.  The release protocol still runs in that case.
    pub async fn stop(self) -> Result<(), EngineError> {
        self.running.store(false, Ordering::Release);

        let mut failure = None;
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::warn!("periodic task ended abnormally: {e}");
                if failure.is_none() {
                    failure = Some(EngineError::TaskFailed(e.to_string()));
                }
            }
        }

        // The hook thread may still deliver queued key events until it is
        // joined, so it goes first and the release protocol runs after it.
        let hook = Arc::clone(&self.hook);
        if let Err(e) = tokio::task::spawn_blocking(move || hook.uninstall()).await {
            tracing::warn!("keyboard hook removal failed: {e}");
            if failure.is_none() {
                failure = Some(EngineError::TaskFailed(e.to_string()));
            }
        }
        self.modes.release_all();
        tracing::info!("pointer engine stopped");

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
