//! Windows pointer injection via the SendInput API.
//!
//! Motion is injected as relative `MOUSEEVENTF_MOVE` input, so the OS applies
//! its usual pointer-speed settings and games that read raw relative input
//! see the movement too.  Button transitions use the matching
//! `MOUSEEVENTF_*DOWN` / `*UP` flags.

#![cfg(target_os = "windows")]

use arrow_clicker_core::Button;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEINPUT, MOUSE_EVENT_FLAGS,
};

use crate::application::pointer::{InjectionError, PointerInjector};

/// Windows implementation of [`PointerInjector`] using SendInput.
pub struct SendInputInjector;

impl SendInputInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SendInputInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerInjector for SendInputInjector {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), InjectionError> {
        send_mouse(dx, dy, MOUSEEVENTF_MOVE)
    }

    fn button(&self, button: Button, down: bool) -> Result<(), InjectionError> {
        send_mouse(0, 0, button_flags(button, down))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Maps a button transition to its `MOUSEEVENTF_*` flag.
fn button_flags(button: Button, down: bool) -> MOUSE_EVENT_FLAGS {
    match (button, down) {
        (Button::Left, true) => MOUSEEVENTF_LEFTDOWN,
        (Button::Left, false) => MOUSEEVENTF_LEFTUP,
        (Button::Middle, true) => MOUSEEVENTF_MIDDLEDOWN,
        (Button::Middle, false) => MOUSEEVENTF_MIDDLEUP,
        (Button::Right, true) => MOUSEEVENTF_RIGHTDOWN,
        (Button::Right, false) => MOUSEEVENTF_RIGHTUP,
    }
}

fn send_mouse(dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> Result<(), InjectionError> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    // SAFETY: input is a valid MOUSEINPUT structure on the stack
    let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if sent == 1 {
        Ok(())
    } else {
        // SendInput returns 0 when the input was blocked (e.g. by UIPI).
        Err(InjectionError::Platform(format!(
            "SendInput injected {sent} of 1 events"
        )))
    }
}
