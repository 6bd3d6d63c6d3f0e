//! The shared input-state aggregate.
//!
//! A single [`InputState`] lives for the whole process.  It is written by the
//! keyboard hook (direction and button transitions, mode flips) and by the
//! control loop (speeds), and read by the motion driver.  The application
//! layer wraps it in one mutex so that a mode flip and its release protocol
//! are observed atomically by every other task.
//!
//! # Invariants
//!
//! - `speed(d)` is always within `[0, max_speed]`; only [`InputState::advance_speeds`]
//!   writes a non-zero speed and it clamps through [`next_speed`].
//! - A button is only ever marked pressed while in [`Mode::PointerControl`].
//!   [`InputState::flip_mode`] clears every pressed flag, every held direction,
//!   and every speed in the same call that flips the mode.

use super::motion::{next_speed, MotionParams};

// ── Direction ─────────────────────────────────────────────────────────────────

/// A pointer movement direction, one per arrow key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 4;

    /// All directions, in index order.
    pub const ALL: [Direction; Self::COUNT] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Dense index used for the per-direction arrays in [`InputState`].
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

// ── Button ────────────────────────────────────────────────────────────────────

/// An emulated mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    Left,
    Middle,
    Right,
}

impl Button {
    /// Number of buttons.
    pub const COUNT: usize = 3;

    /// All buttons, in index order.
    pub const ALL: [Button; Self::COUNT] = [Button::Left, Button::Middle, Button::Right];

    /// Dense index used for the pressed-flag array in [`InputState`].
    pub const fn index(self) -> usize {
        match self {
            Button::Left => 0,
            Button::Middle => 1,
            Button::Right => 2,
        }
    }
}

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Whether the keyboard is currently driving the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Movement and button keys are intercepted and converted to mouse actions.
    #[default]
    PointerControl,
    /// Every key behaves as normal keyboard input.
    PassThrough,
}

impl Mode {
    /// Returns the opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::PointerControl => Mode::PassThrough,
            Mode::PassThrough => Mode::PointerControl,
        }
    }

    /// Human-readable label used in log output.
    pub fn label(self) -> &'static str {
        match self {
            Mode::PointerControl => "MOUSE MODE",
            Mode::PassThrough => "INPUT MODE",
        }
    }
}

// ── ToggleState ───────────────────────────────────────────────────────────────

/// Debounce state machine for the mode-toggle key.
///
/// Holding a key makes the OS deliver auto-repeat key-down events.  Only the
/// first down after an up may flip the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    /// The toggle key is up.
    #[default]
    Idle,
    /// The toggle key is physically held; repeated downs are ignored.
    Held,
}

impl ToggleState {
    /// Feeds one toggle-key transition into the state machine.
    ///
    /// Returns `true` exactly when the transition should flip the mode
    /// (a down while [`ToggleState::Idle`]).
    pub fn on_transition(&mut self, is_down: bool) -> bool {
        match (*self, is_down) {
            (ToggleState::Idle, true) => {
                *self = ToggleState::Held;
                true
            }
            (ToggleState::Held, true) => false,
            (_, false) => {
                *self = ToggleState::Idle;
                false
            }
        }
    }
}

// ── InputState ────────────────────────────────────────────────────────────────

/// The shared mutable record of held keys, speeds, pressed buttons, and mode.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Direction::COUNT],
    speed: [f64; Direction::COUNT],
    pressed: [bool; Button::COUNT],
    mode: Mode,
    toggle: ToggleState,
}

impl InputState {
    /// Creates the startup state: pointer-control mode, nothing held, all speeds zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_pointer_control(&self) -> bool {
        self.mode == Mode::PointerControl
    }

    /// Returns the toggle-key debounce state.
    pub fn toggle_state(&self) -> ToggleState {
        self.toggle
    }

    /// Feeds a toggle-key transition into the debounce machine.
    ///
    /// See [`ToggleState::on_transition`].
    pub fn on_toggle_transition(&mut self, is_down: bool) -> bool {
        self.toggle.on_transition(is_down)
    }

    // ── Directions ────────────────────────────────────────────────────────────

    /// Marks `direction` as held.  Ignored outside pointer-control mode.
    pub fn press_direction(&mut self, direction: Direction) {
        if self.is_pointer_control() {
            self.held[direction.index()] = true;
        }
    }

    /// Marks `direction` as released.
    pub fn release_direction(&mut self, direction: Direction) {
        self.held[direction.index()] = false;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held[direction.index()]
    }

    /// Iterates over the currently held directions.
    pub fn active_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.is_held(*d))
    }

    // ── Speeds ────────────────────────────────────────────────────────────────

    /// Current speed of `direction` in pixels per tick.
    pub fn speed(&self, direction: Direction) -> f64 {
        self.speed[direction.index()]
    }

    /// Recomputes every direction's speed for one control-loop tick.
    ///
    /// In pointer-control mode each direction follows [`next_speed`] using
    /// its own held flag.  In pass-through mode all four speeds are forced to
    /// zero without reading the held set.
    pub fn advance_speeds(&mut self, params: &MotionParams) {
        if !self.is_pointer_control() {
            self.zero_speeds();
            return;
        }
        for direction in Direction::ALL {
            let i = direction.index();
            self.speed[i] = next_speed(
                self.speed[i],
                self.held[i],
                params.max_speed,
                params.step,
                params.accel,
            );
        }
    }

    /// The fractional `(dx, dy)` the motion driver should apply this tick.
    ///
    /// Positive `dx` is rightward and positive `dy` is downward, matching
    /// screen coordinates.
    pub fn motion_delta(&self) -> (f64, f64) {
        let dx = self.speed(Direction::Right) - self.speed(Direction::Left);
        let dy = self.speed(Direction::Down) - self.speed(Direction::Up);
        (dx, dy)
    }

    fn zero_speeds(&mut self) {
        self.speed = [0.0; Direction::COUNT];
    }

    // ── Buttons ───────────────────────────────────────────────────────────────

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    /// Records a button-down.
    ///
    /// Returns `true` when the caller must inject a button-down, i.e. the
    /// button was not already pressed and the state is in pointer-control
    /// mode.  A repeated down returns `false`.
    pub fn press_button(&mut self, button: Button) -> bool {
        if !self.is_pointer_control() || self.pressed[button.index()] {
            return false;
        }
        self.pressed[button.index()] = true;
        true
    }

    /// Records a button-up.
    ///
    /// Returns `true` when the caller must inject a button-up, i.e. the
    /// button was pressed.  A repeated up returns `false`.
    pub fn release_button(&mut self, button: Button) -> bool {
        std::mem::replace(&mut self.pressed[button.index()], false)
    }

    // ── Release protocol ──────────────────────────────────────────────────────

    /// Zeroes every speed, clears every held direction, and clears every
    /// pressed button.
    ///
    /// Returns the buttons that were pressed, in [`Button::ALL`] order.  The
    /// caller must inject exactly one button-up for each.
    pub fn release_all(&mut self) -> Vec<Button> {
        self.zero_speeds();
        self.held = [false; Direction::COUNT];
        Button::ALL
            .into_iter()
            .filter(|b| self.release_button(*b))
            .collect()
    }

    /// Inverts the mode and runs the release protocol.
    ///
    /// Returns the new mode and the buttons that need a button-up injection.
    pub fn flip_mode(&mut self) -> (Mode, Vec<Button>) {
        self.mode = self.mode.toggled();
        let released = self.release_all();
        tracing::debug!(
            mode = self.mode.label(),
            released = released.len(),
            "input state mode flipped"
        );
        (self.mode, released)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
