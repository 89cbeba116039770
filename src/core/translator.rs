// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/translator.rs
//!
//! Raw input code → canonical token translation
//!
//! Raw codes are physical key codes (`KeyA`, `ControlLeft`, `Numpad5`) and
//! named mouse buttons (`MouseLeft`). Canonical tokens are the lowercase
//! strings the game expects (`a`, `lctrl`, `np_5`, `mouse1`).
//!
//! `translate` is total: unknown codes come back unchanged so that unusual
//! hardware still produces a usable token.
//!
//! `display_label` goes the other way for presentation only and must never
//! feed back into persisted binds.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `KeyA`, `Digit7` and `Numpad3` style codes
static PATTERN_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Key|Digit|Numpad)([A-Z0-9])$").expect("key code pattern should be valid regex")
});

/// Matches a device prefix at the start of an exported bind (`kb1_`)
static PATTERN_DEVICE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z]{2}\d+_").expect("device prefix pattern should be valid regex")
});

/// What a raw code contributes to a key combination
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    /// Ctrl/Shift/Alt (either side) or Meta
    Modifier(ModifierGroup),
    /// A mouse button
    MouseButton,
    /// Anything else, including wheel directions
    Normal,
}

/// Modifier families; at most one key per family joins a combination
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ModifierGroup {
    Ctrl,
    Shift,
    Alt,
    Meta,
}

/// Which side of the keyboard a modifier sits on
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    Left,
    Right,
}

/// Classifies a raw code
pub fn classify(code: &str) -> InputKind {
    match modifier_of(code) {
        Some((group, _)) => InputKind::Modifier(group),
        None if is_mouse_button(code) => InputKind::MouseButton,
        None => InputKind::Normal,
    }
}

/// Modifier group and side of a raw modifier code
pub fn modifier_of(code: &str) -> Option<(ModifierGroup, Side)> {
    let found = match code {
        "ControlLeft" => (ModifierGroup::Ctrl, Side::Left),
        "ControlRight" => (ModifierGroup::Ctrl, Side::Right),
        "ShiftLeft" => (ModifierGroup::Shift, Side::Left),
        "ShiftRight" => (ModifierGroup::Shift, Side::Right),
        "AltLeft" => (ModifierGroup::Alt, Side::Left),
        "AltRight" => (ModifierGroup::Alt, Side::Right),
        "MetaLeft" => (ModifierGroup::Meta, Side::Left),
        "MetaRight" => (ModifierGroup::Meta, Side::Right),
        _ => return None,
    };
    Some(found)
}

/// Raw code of a DOM-style mouse button number (0 = left, 1 = middle, 2 = right)
pub fn mouse_button_code(button: u8) -> Option<&'static str> {
    match button {
        0 => Some("MouseLeft"),
        1 => Some("MouseMiddle"),
        2 => Some("MouseRight"),
        3 => Some("MouseButton4"),
        4 => Some("MouseButton5"),
        _ => None,
    }
}

fn is_mouse_button(code: &str) -> bool {
    matches!(
        code,
        "MouseLeft" | "MouseMiddle" | "MouseRight" | "MouseButton4" | "MouseButton5"
    )
}

/// Static raw code → canonical token table
fn lookup(code: &str) -> Option<&'static str> {
    let token = match code {
        // Control/Shift/Alt
        "ControlLeft" => "lctrl",
        "ControlRight" => "rctrl",
        "ShiftLeft" => "lshift",
        "ShiftRight" => "rshift",
        "AltLeft" => "lalt",
        "AltRight" => "ralt",

        // Special keys
        "Backslash" => "backslash",
        "Insert" => "insert",
        "Home" => "home",
        "End" => "end",
        "Delete" => "delete",
        "PageUp" => "pgup",
        "PageDown" => "pgdown",
        "Quote" => "apostrophe",
        "Equal" => "equals",
        "Minus" => "minus",
        "Comma" => "comma",
        "Period" => "period",
        "Slash" => "slash",
        "Semicolon" => "semicolon",
        "Backquote" => "grave",
        "BracketLeft" => "lbracket",
        "BracketRight" => "rbracket",
        "Space" => "space",
        "Enter" => "enter",
        "Escape" => "escape",
        "Tab" => "tab",
        "Backspace" => "backspace",
        "CapsLock" => "capslock",

        // Mouse
        "MouseLeft" => "mouse1",
        "MouseRight" => "mouse2",
        "MouseMiddle" => "mouse3",
        "MouseButton4" => "mouse4",
        "MouseButton5" => "mouse5",

        // Arrows
        "ArrowUp" => "up",
        "ArrowDown" => "down",
        "ArrowLeft" => "left",
        "ArrowRight" => "right",

        // Numpad operators
        "NumpadAdd" => "np_add",
        "NumpadSubtract" => "np_subtract",
        "NumpadMultiply" => "np_multiply",
        "NumpadDivide" => "np_divide",
        "NumpadDecimal" => "np_period",
        "NumpadEnter" => "np_enter",
        _ => return None,
    };
    Some(token)
}

/// Translates a raw key or mouse code into its canonical token
///
/// Priority: static table, `Key<A-Z>`, `Digit<0-9>`, `Numpad<0-9>`, then the
/// raw code unchanged.
pub fn translate(code: &str) -> String {
    if let Some(token) = lookup(code) {
        return token.to_string();
    }

    if let Some(caps) = PATTERN_CODE.captures(code) {
        let kind = &caps[1];
        let ch = &caps[2];
        match kind {
            "Key" if ch.chars().all(|c| c.is_ascii_uppercase()) => return ch.to_lowercase(),
            "Digit" if ch.chars().all(|c| c.is_ascii_digit()) => return ch.to_string(),
            "Numpad" if ch.chars().all(|c| c.is_ascii_digit()) => return format!("np_{}", ch),
            _ => {}
        }
    }

    code.to_string()
}

/// Symbol substitutions for display
fn display_symbol(token: &str) -> Option<&'static str> {
    let symbol = match token {
        "lalt" => "AltLeft",
        "ralt" => "AltRight",
        "lctrl" => "ControlLeft",
        "rctrl" => "ControlRight",
        "lshift" => "ShiftLeft",
        "rshift" => "ShiftRight",
        "subtract" | "minus" => "-",
        "backslash" => "\\",
        "comma" => ",",
        "apostrophe" => "'",
        "period" => ".",
        "slash" | "divide" => "/",
        "backquote" | "grave" => "`",
        "equals" => "=",
        "pgup" => "Page Up",
        "pgdown" => "Page Down",
        "backspace" => "🡸 Backspace",
        "up" => "🢁",
        "down" => "🢃",
        "left" => "🡸",
        "right" => "🢂",
        "multiply" => "*",
        "add" => "+",
        _ => return None,
    };
    Some(symbol)
}

/// Human-readable label for one canonical token
///
/// Left/right modifiers get a side glyph (`◀ CTRL`, `Shift ▶`), numpad keys
/// read `Num <key>`, punctuation is shown as its symbol.
pub fn display_label(token: &str) -> String {
    let token = PATTERN_DEVICE_PREFIX.replace(token.trim(), "");
    let lower = token.to_lowercase();
    if lower.is_empty() {
        return String::new();
    }

    let mut display = match lower.strip_prefix("np_") {
        Some(rest) => format!("Num {}", display_symbol(rest).unwrap_or(rest)),
        None => display_symbol(&lower).unwrap_or(&lower).to_string(),
    };

    let mut chars = display.chars();
    if let Some(first) = chars.next() {
        display = first.to_uppercase().chain(chars).collect();
    }

    let side = if display.ends_with("Left") {
        Some(Side::Left)
    } else if display.ends_with("Right") {
        Some(Side::Right)
    } else {
        None
    };

    display = display
        .replace("ControlLeft", "CTRL")
        .replace("ControlRight", "CTRL")
        .replace("ShiftLeft", "Shift")
        .replace("ShiftRight", "Shift")
        .replace("AltLeft", "Alt")
        .replace("AltRight", "Alt");

    match side {
        Some(Side::Left) => format!("◀ {}", display),
        Some(Side::Right) => format!("{} ▶", display),
        None => display,
    }
}

/// Labels for every token of a bind string, in order
pub fn display_bind(bind: &str) -> Vec<String> {
    bind.split('+')
        .map(display_label)
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_table_entries() {
        assert_eq!(translate("ControlLeft"), "lctrl");
        assert_eq!(translate("AltRight"), "ralt");
        assert_eq!(translate("PageDown"), "pgdown");
        assert_eq!(translate("MouseMiddle"), "mouse3");
        assert_eq!(translate("NumpadDecimal"), "np_period");
    }

    #[test]
    fn test_translate_patterns() {
        assert_eq!(translate("KeyA"), "a");
        assert_eq!(translate("Digit7"), "7");
        assert_eq!(translate("Numpad5"), "np_5");
    }

    #[test]
    fn test_translate_falls_back_to_raw() {
        assert_eq!(translate("F13"), "F13");
        assert_eq!(translate("mwheel_up"), "mwheel_up");
        assert_eq!(translate("Keya"), "Keya");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("ShiftRight"), InputKind::Modifier(ModifierGroup::Shift));
        assert_eq!(classify("MetaLeft"), InputKind::Modifier(ModifierGroup::Meta));
        assert_eq!(classify("MouseLeft"), InputKind::MouseButton);
        assert_eq!(classify("KeyQ"), InputKind::Normal);
        assert_eq!(classify("mwheel_down"), InputKind::Normal);
    }

    #[test]
    fn test_display_label_side_glyphs() {
        assert_eq!(display_label("lctrl"), "◀ CTRL");
        assert_eq!(display_label("rshift"), "Shift ▶");
        assert_eq!(display_label("ralt"), "Alt ▶");
    }

    #[test]
    fn test_display_label_symbols() {
        assert_eq!(display_label("equals"), "=");
        assert_eq!(display_label("np_5"), "Num 5");
        assert_eq!(display_label("np_add"), "Num +");
        assert_eq!(display_label("f"), "F");
    }

    #[test]
    fn test_display_bind_strips_device_prefix() {
        assert_eq!(display_bind("kb1_lctrl+a"), vec!["◀ CTRL", "A"]);
        assert!(display_bind("").is_empty());
    }
}
