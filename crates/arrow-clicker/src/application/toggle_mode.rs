//! ModeController: switches between pointer-control and pass-through mode.
//!
//! The toggle key is debounced by the [`ToggleState`](arrow_clicker_core::ToggleState)
//! machine stored in the shared state: only the first key-down after a
//! key-up flips the mode, so OS auto-repeat cannot make the mode flicker.
//!
//! Every flip, in either direction, runs the release protocol while the
//! state lock is held: speeds are zeroed, held directions are cleared, and a
//! button-up is injected for every button still pressed.  No task can see
//! the new mode with a stale pressed button, or the old mode with cleared
//! speeds.

use std::sync::Arc;

use arrow_clicker_core::{Button, InputState, Mode};

use super::pointer::{emit_button, PointerInjector};
use super::shared_state::SharedInputState;

/// The mode-toggle use case.
pub struct ModeController {
    state: SharedInputState,
    injector: Arc<dyn PointerInjector>,
}

impl ModeController {
    pub fn new(state: SharedInputState, injector: Arc<dyn PointerInjector>) -> Self {
        Self { state, injector }
    }

    /// Handles one transition of the toggle key.
    ///
    /// Returns the new mode when this transition flipped it.
    pub fn handle_toggle(&self, is_down: bool) -> Option<Mode> {
        let mut state = self.state.lock();
        if !state.on_toggle_transition(is_down) {
            return None;
        }
        Some(self.flip_locked(&mut state))
    }

    /// Inverts the mode and runs the release protocol.
    pub fn flip_mode(&self) -> Mode {
        let mut state = self.state.lock();
        self.flip_locked(&mut state)
    }

    /// Runs the release protocol without changing the mode.
    ///
    /// Used on shutdown so that no button is left pressed at the OS level.
    /// Returns the buttons that were released.
    pub fn release_all(&self) -> Vec<Button> {
        let mut state = self.state.lock();
        let released = state.release_all();
        self.emit_releases(&released);
        released
    }

    fn flip_locked(&self, state: &mut InputState) -> Mode {
        let (mode, released) = state.flip_mode();
        self.emit_releases(&released);
        tracing::info!("Mode switched: {}", mode.label());
        mode
    }

    fn emit_releases(&self, released: &[Button]) {
        for &button in released {
            emit_button(self.injector.as_ref(), button, false);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
