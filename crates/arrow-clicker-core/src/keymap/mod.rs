//! Key-name tables: which raw key names Arrow Clicker owns.
//!
//! Keyboard hooks report keys by name (`"left ctrl"`, `"up"`, ...).  Different
//! keyboards and OS layers report the same physical key under different
//! names, so each mouse button is bound to a *set* of aliases.
//!
//! Only left-hand modifiers are bound.  A name describing the right-hand
//! variant of a modifier (`"right ctrl"`, `"right alt"`, `"right windows"`)
//! never resolves to a button, so the right side of each pair stays
//! available for normal typing even in pointer-control mode.

pub mod windows_vk;

use crate::domain::input_state::{Button, Direction};

/// Key that switches between pointer-control and pass-through mode.
pub const TOGGLE_KEY: &str = "right shift";

/// Raw names bound to the left mouse button.
pub const LEFT_CLICK_KEYS: &[&str] = &["left ctrl", "left control", "lctrl", "ctrl"];

/// Raw names bound to the middle mouse button.
pub const MIDDLE_CLICK_KEYS: &[&str] = &["left windows", "left win", "lwin", "win"];

/// Raw names bound to the right mouse button.
pub const RIGHT_CLICK_KEYS: &[&str] = &["left alt", "left menu", "lalt", "alt"];

/// What a recognised key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// The mode-toggle key.
    Toggle,
    /// An arrow key moving the pointer.
    Move(Direction),
    /// A key acting as a mouse button.
    Click(Button),
}

/// Resolves a raw key name to the role it plays, if any.
///
/// Matching is case-insensitive.  Returns `None` for every key the tool does
/// not own, including the excluded right-hand modifier variants.
pub fn resolve_key(raw_name: &str) -> Option<KeyRole> {
    let name = raw_name.to_lowercase();
    if name == TOGGLE_KEY {
        return Some(KeyRole::Toggle);
    }
    if let Some(direction) = direction_for(&name) {
        return Some(KeyRole::Move(direction));
    }
    button_for(&name).map(KeyRole::Click)
}

/// Maps a lower-case name to its movement direction.
fn direction_for(name: &str) -> Option<Direction> {
    match name {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

/// Maps a lower-case name to its mouse button, skipping right-hand variants.
fn button_for(name: &str) -> Option<Button> {
    if name.contains("right") {
        return None;
    }
    [
        (Button::Left, LEFT_CLICK_KEYS),
        (Button::Middle, MIDDLE_CLICK_KEYS),
        (Button::Right, RIGHT_CLICK_KEYS),
    ]
    .into_iter()
    .find(|(_, aliases)| aliases.contains(&name))
    .map(|(button, _)| button)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
