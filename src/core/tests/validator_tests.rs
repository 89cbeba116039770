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

use crate::core::validator::{validate_combination, Composition, ValidationError};

fn codes(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_single_key_is_valid() {
    assert!(validate_combination(&codes(&["KeyS"])).is_ok());
}

#[test]
fn test_modifier_plus_key_is_valid() {
    assert!(validate_combination(&codes(&["ControlLeft", "KeyA"])).is_ok());
    assert!(validate_combination(&codes(&["ControlLeft", "ShiftLeft", "AltRight", "KeyA"])).is_ok());
}

#[test]
fn test_lone_modifier_is_valid() {
    assert!(validate_combination(&codes(&["ShiftLeft"])).is_ok());
}

#[test]
fn test_modifier_plus_mouse_is_valid() {
    assert!(validate_combination(&codes(&["AltLeft", "MouseLeft"])).is_ok());
}

#[test]
fn test_two_normal_keys_reject() {
    assert_eq!(
        validate_combination(&codes(&["KeyA", "KeyB"])),
        Err(ValidationError::TooManyKeys(2))
    );
}

#[test]
fn test_modifiers_without_key_reject() {
    assert_eq!(
        validate_combination(&codes(&["ControlLeft", "ShiftLeft"])),
        Err(ValidationError::ModifiersWithoutKey(2))
    );
}

#[test]
fn test_modifiers_with_mouse_but_no_key_reject() {
    assert_eq!(
        validate_combination(&codes(&["ControlLeft", "ShiftLeft", "MouseRight"])),
        Err(ValidationError::ModifiersWithoutKey(2))
    );
}

#[test]
fn test_two_mouse_buttons_reject() {
    assert_eq!(
        validate_combination(&codes(&["MouseLeft", "MouseRight"])),
        Err(ValidationError::TooManyMouseButtons(2))
    );
}

#[test]
fn test_wheel_counts_as_normal_key() {
    assert!(validate_combination(&codes(&["ControlLeft", "ShiftLeft", "mwheel_up"])).is_ok());
    assert_eq!(
        validate_combination(&codes(&["KeyA", "mwheel_down"])),
        Err(ValidationError::TooManyKeys(2))
    );
}

#[test]
fn test_empty_combination_rejects() {
    assert_eq!(validate_combination(&[]), Err(ValidationError::Empty));
}

#[test]
fn test_composition_counts() {
    let composition = Composition::of(&codes(&["ControlLeft", "MouseLeft", "KeyA", "KeyB"]));
    assert_eq!(composition.modifiers, 1);
    assert_eq!(composition.mouse_buttons, 1);
    assert_eq!(composition.normal_keys, 2);
    assert_eq!(composition.total(), 4);
}
