//! Windows Virtual Key (VK) code to raw key-name translation table.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! The low-level keyboard hook reports a VK code plus an "extended key" flag.
//! This module turns that pair into the lower-case key name used by
//! [`resolve_key`](super::resolve_key).  Left-hand modifiers use their bare
//! name (`"ctrl"`, `"alt"`, `"shift"`); right-hand modifiers are prefixed with
//! `"right "`, matching the names common keyboard libraries report.
//!
//! `VK_NAME_TABLE` is a compile-time array of 256 names indexed by VK code,
//! so every lookup on the hook path is O(1).  Codes without a name store `""`.

/// Translates a VK code and extended flag to a key name.
///
/// Returns `None` for VK codes with no name (mouse-button VKs, OEM-specific
/// codes, and so on).
pub fn vk_to_key_name(vk: u8, is_extended: bool) -> Option<&'static str> {
    // The generic modifier VKs only carry their side in the extended flag.
    let name = match (vk, is_extended) {
        (0x10, _) => "shift",
        (0x11, true) => "right ctrl",
        (0x12, true) => "right alt",
        _ => VK_NAME_TABLE[vk as usize],
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// VK → name mapping table indexed by VK code (0x00–0xFF).
const VK_NAME_TABLE: [&str; 256] = {
    let mut t = [""; 256];

    // ── Control keys ─────────────────────────────────────────────────────────
    t[0x08] = "backspace";
    t[0x09] = "tab";
    t[0x0D] = "enter";
    t[0x13] = "pause";
    t[0x14] = "caps lock";
    t[0x1B] = "esc";
    t[0x20] = "space";
    t[0x21] = "page up";
    t[0x22] = "page down";
    t[0x23] = "end";
    t[0x24] = "home";
    t[0x2C] = "print screen";
    t[0x2D] = "insert";
    t[0x2E] = "delete";
    t[0x5D] = "menu";
    t[0x90] = "num lock";
    t[0x91] = "scroll lock";

    // ── Arrow keys ────────────────────────────────────────────────────────────
    t[0x25] = "left";
    t[0x26] = "up";
    t[0x27] = "right";
    t[0x28] = "down";

    // ── Modifiers ─────────────────────────────────────────────────────────────
    t[0x10] = "shift"; // VK_SHIFT
    t[0x11] = "ctrl"; // VK_CONTROL
    t[0x12] = "alt"; // VK_MENU
    t[0xA0] = "shift"; // VK_LSHIFT
    t[0xA1] = "right shift"; // VK_RSHIFT
    t[0xA2] = "ctrl"; // VK_LCONTROL
    t[0xA3] = "right ctrl"; // VK_RCONTROL
    t[0xA4] = "alt"; // VK_LMENU
    t[0xA5] = "right alt"; // VK_RMENU
    t[0x5B] = "left windows"; // VK_LWIN
    t[0x5C] = "right windows"; // VK_RWIN

    // ── Digits and letters ────────────────────────────────────────────────────
    let digits = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    let mut i = 0;
    while i < digits.len() {
        t[0x30 + i] = digits[i];
        i += 1;
    }
    let letters = [
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q",
        "r", "s", "t", "u", "v", "w", "x", "y", "z",
    ];
    let mut i = 0;
    while i < letters.len() {
        t[0x41 + i] = letters[i];
        i += 1;
    }

    // ── Function keys (VK_F1=0x70 … VK_F24=0x87) ─────────────────────────────
    let fkeys = [
        "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "f13", "f14",
        "f15", "f16", "f17", "f18", "f19", "f20", "f21", "f22", "f23", "f24",
    ];
    let mut i = 0;
    while i < fkeys.len() {
        t[0x70 + i] = fkeys[i];
        i += 1;
    }

    // ── Numpad ────────────────────────────────────────────────────────────────
    t[0x6A] = "*";
    t[0x6B] = "+";
    t[0x6D] = "-";
    t[0x6E] = "decimal";
    t[0x6F] = "/";

    // ── OEM punctuation (US layout) ───────────────────────────────────────────
    t[0xBA] = ";";
    t[0xBB] = "=";
    t[0xBC] = ",";
    t[0xBD] = "-";
    t[0xBE] = ".";
    t[0xBF] = "/";
    t[0xC0] = "`";
    t[0xDB] = "[";
    t[0xDC] = "\\";
    t[0xDD] = "]";
    t[0xDE] = "'";

    t
};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input_state::{Button, Direction};
    use crate::keymap::{resolve_key, KeyRole};

    #[test]
    fn test_arrow_vks_resolve_to_directions() {
        let cases = [
            (0x25, Direction::Left),
            (0x26, Direction::Up),
            (0x27, Direction::Right),
            (0x28, Direction::Down),
        ];
        for (vk, direction) in cases {
            let name = vk_to_key_name(vk, true).expect("arrow keys have names");
            assert_eq!(resolve_key(name), Some(KeyRole::Move(direction)));
        }
    }

    #[test]
    fn test_left_modifiers_resolve_to_buttons() {
        assert_eq!(
            vk_to_key_name(0xA2, false).and_then(resolve_key),
            Some(KeyRole::Click(Button::Left))
        );
        assert_eq!(
            vk_to_key_name(0x5B, true).and_then(resolve_key),
            Some(KeyRole::Click(Button::Middle))
        );
        assert_eq!(
            vk_to_key_name(0xA4, false).and_then(resolve_key),
            Some(KeyRole::Click(Button::Right))
        );
    }

    #[test]
    fn test_right_modifiers_are_not_owned() {
        for vk in [0xA3, 0xA5, 0x5C] {
            let name = vk_to_key_name(vk, true).expect("right modifiers have names");
            assert!(name.starts_with("right "), "got {name:?}");
            assert_eq!(resolve_key(name), None);
        }
    }

    #[test]
    fn test_right_shift_is_toggle() {
        assert_eq!(
            vk_to_key_name(0xA1, false).and_then(resolve_key),
            Some(KeyRole::Toggle)
        );
    }

    #[test]
    fn test_generic_control_uses_extended_flag_for_side() {
        assert_eq!(vk_to_key_name(0x11, false), Some("ctrl"));
        assert_eq!(vk_to_key_name(0x11, true), Some("right ctrl"));
        assert_eq!(vk_to_key_name(0x12, true), Some("right alt"));
    }

    #[test]
    fn test_letters_and_digits_cover_full_range() {
        assert_eq!(vk_to_key_name(0x41, false), Some("a"));
        assert_eq!(vk_to_key_name(0x5A, false), Some("z"));
        assert_eq!(vk_to_key_name(0x30, false), Some("0"));
        assert_eq!(vk_to_key_name(0x39, false), Some("9"));
        assert_eq!(vk_to_key_name(0x87, false), Some("f24"));
    }

    #[test]
    fn test_unmapped_vk_returns_none() {
        // VK_LBUTTON and an unassigned code
        assert_eq!(vk_to_key_name(0x01, false), None);
        assert_eq!(vk_to_key_name(0xFF, false), None);
    }
}
