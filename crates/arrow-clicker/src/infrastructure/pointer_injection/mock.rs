//! Mock pointer injector for unit testing.
//!
//! # Why a mock injector?
//!
//! The real injector (`SendInputInjector`) makes OS API calls that:
//!
//! - Require a physical desktop session to run.
//! - Actually move the cursor and click on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! The `MockPointerInjector` replaces all OS calls with in-memory recording.
//! Each emitted action is pushed into a `Mutex<Vec<...>>` so that test
//! assertions can inspect exactly what was emitted and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = Arc::new(MockPointerInjector::new());
//! let router = KeyEventRouter::new(state, Arc::clone(&injector) as _, modes);
//!
//! router.route("ctrl", true);
//!
//! let buttons = injector.buttons.lock().unwrap();
//! assert_eq!(buttons.as_slice(), &[(Button::Left, true)]);
//! ```
//!
//! # `should_fail` flag
//!
//! Build with [`MockPointerInjector::failing`] to simulate OS failures and
//! exercise the fire-and-forget paths.

use std::sync::Mutex;

use arrow_clicker_core::Button;

use crate::application::pointer::{InjectionError, PointerInjector};

/// A mock injector that records all calls without performing OS API calls.
#[derive(Default)]
pub struct MockPointerInjector {
    /// Records each `(dx, dy)` passed to `move_relative`.
    pub moves: Mutex<Vec<(i32, i32)>>,
    /// Records each `(button, down)` passed to `button`.
    pub buttons: Mutex<Vec<(Button, bool)>>,
    /// When `true`, every method returns `InjectionError::Platform` without recording.
    pub should_fail: bool,
}

impl MockPointerInjector {
    /// Creates a new injector with empty records and `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an injector whose every call fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Sum of all recorded moves.
    pub fn total_motion(&self) -> (i64, i64) {
        self.moves
            .lock()
            .unwrap()
            .iter()
            .fold((0, 0), |(x, y), &(dx, dy)| (x + i64::from(dx), y + i64::from(dy)))
    }
}

impl PointerInjector for MockPointerInjector {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.moves.lock().unwrap().push((dx, dy));
        Ok(())
    }

    fn button(&self, button: Button, down: bool) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.buttons.lock().unwrap().push((button, down));
        Ok(())
    }
}
