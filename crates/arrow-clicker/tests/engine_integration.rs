//! End-to-end tests of the pointer engine lifecycle.
//!
//! The engine runs with a mock keyboard hook and a recording pointer injector
//! on a paused Tokio clock, so "holding a key for 200 ms" takes no real time.

use std::sync::Arc;
use std::time::Duration;

use arrow_clicker::application::capture_keys::{KeyVerdict, KeyboardHook};
use arrow_clicker::application::engine::{EngineSettings, PointerEngine};
use arrow_clicker::application::pointer::PointerInjector;
use arrow_clicker::infrastructure::keyboard_hook::mock::MockKeyboardHook;
use arrow_clicker::infrastructure::pointer_injection::mock::MockPointerInjector;
use arrow_clicker_core::{Button, Direction, Mode, MotionParams};

fn make_engine(settings: EngineSettings) -> (PointerEngine, Arc<MockKeyboardHook>, Arc<MockPointerInjector>) {
    let hook = Arc::new(MockKeyboardHook::new());
    let injector = Arc::new(MockPointerInjector::new());
    let engine = PointerEngine::new(
        settings,
        Arc::clone(&injector) as Arc<dyn PointerInjector>,
        Arc::clone(&hook) as Arc<dyn KeyboardHook>,
    );
    (engine, hook, injector)
}

#[tokio::test(start_paused = true)]
async fn test_holding_right_accelerates_to_ceiling_then_stops_on_release() {
    // Arrange
    let (engine, hook, injector) = make_engine(EngineSettings::default());
    let running = engine.start().expect("start");
    let state = running.state();

    // Act: hold Right for 200 ms (40 ticks)
    assert_eq!(hook.press("right"), Some(KeyVerdict::Suppress));
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Assert: speed reached the ceiling and the pointer moved right only
    assert_eq!(state.snapshot().speed(Direction::Right), 30.0);
    let (x, y) = injector.total_motion();
    assert!(x > 0, "pointer should have moved right, got {x}");
    assert_eq!(y, 0);

    // Act: release Right
    assert_eq!(hook.release("right"), Some(KeyVerdict::Suppress));
    tokio::time::sleep(Duration::from_millis(20)).await;
    let moves_after_release = injector.moves.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Assert: speed dropped to zero and no further moves were injected
    assert_eq!(state.snapshot().speed(Direction::Right), 0.0);
    assert_eq!(injector.moves.lock().unwrap().len(), moves_after_release);

    running.stop().await.expect("stop");
}

#[tokio::test(start_paused = true)]
async fn test_lower_ceiling_from_settings_is_honoured() {
    let settings = EngineSettings {
        motion: MotionParams::with_max_speed(12).unwrap(),
        ..EngineSettings::default()
    };
    let (engine, hook, injector) = make_engine(settings);
    let running = engine.start().expect("start");

    hook.press("down");
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(running.state().snapshot().speed(Direction::Down), 12.0);
    let moves = injector.moves.lock().unwrap().clone();
    assert!(moves.iter().all(|&(dx, dy)| dx == 0 && (1..=12).contains(&dy)));

    running.stop().await.expect("stop");
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mid_drag_releases_button_and_halts_motion() {
    // Arrange: drag with the left button while moving up
    let (engine, hook, injector) = make_engine(EngineSettings::default());
    let running = engine.start().expect("start");
    let state = running.state();
    hook.press("ctrl");
    hook.press("up");
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Act: tap the toggle key
    assert_eq!(hook.press("right shift"), Some(KeyVerdict::Allow));
    assert_eq!(hook.release("right shift"), Some(KeyVerdict::Allow));
    let moves_at_toggle = injector.moves.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Assert
    let snapshot = state.snapshot();
    assert_eq!(snapshot.mode(), Mode::PassThrough);
    assert!(!snapshot.is_pressed(Button::Left));
    assert_eq!(snapshot.speed(Direction::Up), 0.0);
    assert_eq!(injector.moves.lock().unwrap().len(), moves_at_toggle);
    assert_eq!(
        injector.buttons.lock().unwrap().as_slice(),
        &[(Button::Left, true), (Button::Left, false)]
    );

    // Arrow keys now reach the system untouched
    assert_eq!(hook.press("up"), Some(KeyVerdict::Allow));

    running.stop().await.expect("stop");
}

#[tokio::test(start_paused = true)]
async fn test_stop_releases_held_buttons_exactly_once() {
    // Arrange
    let (engine, hook, injector) = make_engine(EngineSettings::default());
    let running = engine.start().expect("start");
    hook.press("lalt");
    hook.press("win");
    tokio::time::sleep(Duration::from_millis(10)).await;

    // Act
    running.stop().await.expect("stop");

    // Assert
    assert!(!hook.is_installed());
    let buttons = injector.buttons.lock().unwrap();
    assert_eq!(buttons.len(), 4);
    assert_eq!(
        buttons.iter().filter(|&&b| b == (Button::Right, false)).count(),
        1
    );
    assert_eq!(
        buttons.iter().filter(|&&b| b == (Button::Middle, false)).count(),
        1
    );
    assert_eq!(hook.press("lalt"), None, "no handler after stop");
}

#[tokio::test(start_paused = true)]
async fn test_engine_can_be_restarted_on_the_same_hook() {
    let hook = Arc::new(MockKeyboardHook::new());
    for _ in 0..2 {
        let engine = PointerEngine::new(
            EngineSettings::default(),
            Arc::new(MockPointerInjector::new()),
            Arc::clone(&hook) as Arc<dyn KeyboardHook>,
        );
        let running = engine.start().expect("start");
        running.stop().await.expect("stop");
    }
    assert_eq!(hook.install_count(), 2);
}
