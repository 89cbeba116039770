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

//! Captured key combination validation
//!
//! A combination is the ordered list of raw codes recorded during a capture
//! session. It is valid when the game could actually trigger it:
//! - at most one mouse button
//! - at most one normal key
//! - modifiers only together with something to modify
//!
//! A lone modifier is valid (games bind plain `lshift`), two modifiers
//! without a normal key are not, even when a mouse button is present. Wheel
//! directions count as normal keys.
//!
//! Manual entry deliberately bypasses these rules.

use thiserror::Error;

use crate::core::translator::{classify, InputKind};

/// Reasons a captured combination is rejected
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// Two or more mouse buttons in one combination
    #[error("Only one mouse button can be bound at a time ({0} pressed)")]
    TooManyMouseButtons(usize),

    /// Several modifiers with no key to modify
    #[error("{0} modifiers were pressed without a key to modify")]
    ModifiersWithoutKey(usize),

    /// Two or more normal keys in one combination
    #[error("Only one non-modifier key can be bound at a time ({0} pressed)")]
    TooManyKeys(usize),

    /// Nothing was captured
    #[error("No input captured")]
    Empty,
}

/// Counts of each input kind in a combination
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Composition {
    pub modifiers: usize,
    pub mouse_buttons: usize,
    pub normal_keys: usize,
}

impl Composition {
    pub fn of(codes: &[String]) -> Self {
        codes
            .iter()
            .fold(Composition::default(), |mut acc, code| {
                match classify(code) {
                    InputKind::Modifier(_) => acc.modifiers += 1,
                    InputKind::MouseButton => acc.mouse_buttons += 1,
                    InputKind::Normal => acc.normal_keys += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.modifiers + self.mouse_buttons + self.normal_keys
    }
}

/// Validates a captured combination of raw codes
///
/// Rules are checked in a fixed order so the reported error is stable:
/// mouse buttons, bare modifiers, then normal keys.
pub fn validate_combination(codes: &[String]) -> Result<(), ValidationError> {
    let composition = Composition::of(codes);

    if composition.total() == 0 {
        return Err(ValidationError::Empty);
    }

    if composition.mouse_buttons > 1 {
        return Err(ValidationError::TooManyMouseButtons(composition.mouse_buttons));
    }

    if composition.modifiers >= 2 && composition.normal_keys == 0 {
        return Err(ValidationError::ModifiersWithoutKey(composition.modifiers));
    }

    if composition.normal_keys > 1 {
        return Err(ValidationError::TooManyKeys(composition.normal_keys));
    }

    Ok(())
}
