//! KeyEventRouter: the per-key suppression decision.
//!
//! This use case runs inside the OS keyboard hook for every key transition
//! on the system.  It resolves the raw key name, updates the shared
//! [`InputState`](arrow_clicker_core::InputState), injects button
//! transitions, and returns whether the key is consumed.
//!
//! # Decision table
//!
//! | Key                           | Pointer-control | Pass-through |
//! |-------------------------------|-----------------|--------------|
//! | Toggle (`right shift`)        | flip, Allow     | flip, Allow  |
//! | Arrow key                     | track, Suppress | Allow        |
//! | Button alias (left modifiers) | click, Suppress | Allow        |
//! | Right-hand modifier           | Allow           | Allow        |
//! | Anything else                 | Allow           | Allow        |
//!
//! The router never blocks and never fails: injection errors are logged and
//! dropped, and a poisoned lock is recovered.

use std::sync::Arc;

use arrow_clicker_core::{resolve_key, Button, Direction, KeyRole};

use super::capture_keys::{KeyEventHandler, KeyVerdict};
use super::pointer::{emit_button, PointerInjector};
use super::shared_state::SharedInputState;
use super::toggle_mode::ModeController;

/// The key-routing use case.
pub struct KeyEventRouter {
    state: SharedInputState,
    injector: Arc<dyn PointerInjector>,
    modes: Arc<ModeController>,
}

impl KeyEventRouter {
    /// Creates a router sharing `state` and `injector` with `modes`.
    pub fn new(
        state: SharedInputState,
        injector: Arc<dyn PointerInjector>,
        modes: Arc<ModeController>,
    ) -> Self {
        Self {
            state,
            injector,
            modes,
        }
    }

    /// Decides whether the transition of `raw_key_name` is consumed.
    pub fn route(&self, raw_key_name: &str, is_down: bool) -> KeyVerdict {
        let role = match resolve_key(raw_key_name) {
            Some(role) => role,
            None => return KeyVerdict::Allow,
        };

        let verdict = match role {
            KeyRole::Toggle => {
                self.modes.handle_toggle(is_down);
                KeyVerdict::Allow
            }
            KeyRole::Move(direction) => self.route_direction(direction, is_down),
            KeyRole::Click(button) => self.route_button(button, is_down),
        };
        tracing::debug!(key = raw_key_name, is_down, ?verdict, "key routed");
        verdict
    }

    // ── Private handlers ──────────────────────────────────────────────────────

    fn route_direction(&self, direction: Direction, is_down: bool) -> KeyVerdict {
        let mut state = self.state.lock();
        if !state.is_pointer_control() {
            return KeyVerdict::Allow;
        }
        if is_down {
            state.press_direction(direction);
        } else {
            state.release_direction(direction);
        }
        KeyVerdict::Suppress
    }

    fn route_button(&self, button: Button, is_down: bool) -> KeyVerdict {
        let mut state = self.state.lock();
        if !state.is_pointer_control() {
            return KeyVerdict::Allow;
        }
        let changed = if is_down {
            state.press_button(button)
        } else {
            state.release_button(button)
        };
        // Injected under the lock so a concurrent flip cannot interleave
        // between the flag update and the OS call.
        if changed {
            emit_button(self.injector.as_ref(), button, is_down);
        }
        KeyVerdict::Suppress
    }
}

impl KeyEventHandler for KeyEventRouter {
    fn on_key(&self, key_name: &str, is_down: bool) -> KeyVerdict {
        self.route(key_name, is_down)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pointer::{InjectionError, MockPointerInjector as AutoMockInjector};
    use crate::infrastructure::pointer_injection::mock::MockPointerInjector;
    use arrow_clicker_core::Mode;

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn make_router_with(
        injector: Arc<dyn PointerInjector>,
    ) -> (KeyEventRouter, SharedInputState) {
        let state = SharedInputState::new();
        let modes = Arc::new(ModeController::new(state.clone(), Arc::clone(&injector)));
        (KeyEventRouter::new(state.clone(), injector, modes), state)
    }

    fn make_router() -> (KeyEventRouter, SharedInputState, Arc<MockPointerInjector>) {
        let injector = Arc::new(MockPointerInjector::new());
        let (router, state) = make_router_with(Arc::clone(&injector) as Arc<dyn PointerInjector>);
        (router, state, injector)
    }

    fn tap(router: &KeyEventRouter, key: &str) {
        router.route(key, true);
        router.route(key, false);
    }

    // ── Unowned keys ──────────────────────────────────────────────────────────

    #[test]
    fn test_unowned_keys_are_allowed_and_leave_state_untouched() {
        // Arrange
        let (router, state, injector) = make_router();

        // Act / Assert
        for key in ["a", "space", "enter", "shift", "f5", ""] {
            assert_eq!(router.route(key, true), KeyVerdict::Allow, "{key:?}");
            assert_eq!(router.route(key, false), KeyVerdict::Allow, "{key:?}");
        }
        let snapshot = state.snapshot();
        assert_eq!(snapshot.mode(), Mode::PointerControl);
        assert_eq!(snapshot.active_directions().count(), 0);
        assert!(injector.buttons.lock().unwrap().is_empty());
    }

    // ── Movement keys ─────────────────────────────────────────────────────────

    #[test]
    fn test_arrow_down_is_suppressed_and_tracked() {
        let (router, state, _) = make_router();

        let verdict = router.route("Up", true);

        assert_eq!(verdict, KeyVerdict::Suppress);
        assert!(state.snapshot().is_held(Direction::Up));
    }

    #[test]
    fn test_arrow_up_is_suppressed_and_untracked() {
        let (router, state, _) = make_router();
        router.route("left", true);

        let verdict = router.route("left", false);

        assert_eq!(verdict, KeyVerdict::Suppress);
        assert!(!state.snapshot().is_held(Direction::Left));
    }

    #[test]
    fn test_arrows_pass_through_in_pass_through_mode() {
        // Arrange
        let (router, state, _) = make_router();
        tap(&router, "right shift");

        // Act
        let verdict = router.route("down", true);

        // Assert
        assert_eq!(verdict, KeyVerdict::Allow);
        assert!(!state.snapshot().is_held(Direction::Down));
    }

    // ── Button keys ───────────────────────────────────────────────────────────

    #[test]
    fn test_button_alias_clicks_and_is_suppressed() {
        // Arrange
        let (router, _, injector) = make_router();

        // Act
        let down = router.route("Left Ctrl", true);
        let up = router.route("left ctrl", false);

        // Assert
        assert_eq!(down, KeyVerdict::Suppress);
        assert_eq!(up, KeyVerdict::Suppress);
        assert_eq!(
            injector.buttons.lock().unwrap().as_slice(),
            &[(Button::Left, true), (Button::Left, false)]
        );
    }

    #[test]
    fn test_repeated_down_injects_once() {
        // Arrange
        let (router, _, injector) = make_router();

        // Act: OS auto-repeat delivers several downs before the up
        router.route("alt", true);
        router.route("alt", true);
        router.route("alt", true);
        router.route("alt", false);
        router.route("alt", false);

        // Assert
        assert_eq!(
            injector.buttons.lock().unwrap().as_slice(),
            &[(Button::Right, true), (Button::Right, false)]
        );
    }

    #[test]
    fn test_different_aliases_share_one_button_state() {
        let (router, state, injector) = make_router();

        router.route("lwin", true);
        router.route("left windows", true);

        assert!(state.snapshot().is_pressed(Button::Middle));
        assert_eq!(injector.buttons.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_right_hand_modifiers_pass_through_in_both_modes() {
        // Arrange
        let (router, _, injector) = make_router();
        let keys = ["right ctrl", "right alt", "right windows"];

        // Act / Assert: pointer-control
        for key in keys {
            assert_eq!(router.route(key, true), KeyVerdict::Allow);
            assert_eq!(router.route(key, false), KeyVerdict::Allow);
        }

        // Act / Assert: pass-through
        tap(&router, "right shift");
        for key in keys {
            assert_eq!(router.route(key, true), KeyVerdict::Allow);
            assert_eq!(router.route(key, false), KeyVerdict::Allow);
        }

        assert!(injector.buttons.lock().unwrap().is_empty());
    }

    #[test]
    fn test_button_keys_type_normally_in_pass_through_mode() {
        let (router, state, injector) = make_router();
        tap(&router, "right shift");

        assert_eq!(router.route("ctrl", true), KeyVerdict::Allow);
        assert_eq!(router.route("ctrl", false), KeyVerdict::Allow);
        assert!(!state.snapshot().is_pressed(Button::Left));
        assert!(injector.buttons.lock().unwrap().is_empty());
    }

    // ── Toggle key ────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_key_is_allowed_and_flips_mode() {
        let (router, state, _) = make_router();

        assert_eq!(router.route("right shift", true), KeyVerdict::Allow);
        assert_eq!(state.snapshot().mode(), Mode::PassThrough);
        assert_eq!(router.route("right shift", false), KeyVerdict::Allow);
        assert_eq!(state.snapshot().mode(), Mode::PassThrough);
    }

    #[test]
    fn test_toggle_while_dragging_releases_button() {
        // Arrange: left button held, pointer moving
        let (router, state, injector) = make_router();
        router.route("ctrl", true);
        router.route("right", true);

        // Act
        router.route("right shift", true);

        // Assert
        assert_eq!(
            injector.buttons.lock().unwrap().as_slice(),
            &[(Button::Left, true), (Button::Left, false)]
        );
        let snapshot = state.snapshot();
        assert!(!snapshot.is_pressed(Button::Left));
        assert!(!snapshot.is_held(Direction::Right));

        // Act: the physical ctrl release now arrives in pass-through mode
        let verdict = router.route("ctrl", false);

        // Assert: no duplicate button-up is injected
        assert_eq!(verdict, KeyVerdict::Allow);
        assert_eq!(injector.buttons.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_toggle_debounce_through_router() {
        let (router, state, _) = make_router();

        for down in [true, true, true, false] {
            router.route("right shift", down);
        }

        assert_eq!(state.snapshot().mode(), Mode::PassThrough);
    }

    // ── Failure handling ──────────────────────────────────────────────────────

    #[test]
    fn test_injection_failure_is_swallowed_and_state_still_tracks() {
        // Arrange
        let mut mock = AutoMockInjector::new();
        mock.expect_button()
            .times(1)
            .returning(|_, _| Err(InjectionError::Platform("injected failure".into())));
        let (router, state) = make_router_with(Arc::new(mock));

        // Act
        let verdict = router.route("ctrl", true);

        // Assert
        assert_eq!(verdict, KeyVerdict::Suppress);
        assert!(state.snapshot().is_pressed(Button::Left));
    }

    #[test]
    fn test_handler_trait_delegates_to_route() {
        let (router, _, _) = make_router();
        let handler: &dyn KeyEventHandler = &router;

        assert_eq!(handler.on_key("up", true), KeyVerdict::Suppress);
        assert_eq!(handler.on_key("q", true), KeyVerdict::Allow);
    }
}
