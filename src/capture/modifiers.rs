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

//! Held keyboard modifiers
//!
//! Tracked from every key event whether or not a capture is running, so a
//! controller or joystick capture can combine with modifiers that were
//! pressed before it started.

use crate::core::translator::{modifier_of, ModifierGroup, Side};

/// Left/right state of ctrl, shift and alt
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ModifierState {
    ctrl: [bool; 2],
    shift: [bool; 2],
    alt: [bool; 2],
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, code: &str) -> Option<&mut bool> {
        let (group, side) = modifier_of(code)?;
        let pair = match group {
            ModifierGroup::Ctrl => &mut self.ctrl,
            ModifierGroup::Shift => &mut self.shift,
            ModifierGroup::Alt => &mut self.alt,
            ModifierGroup::Meta => return None,
        };
        Some(match side {
            Side::Left => &mut pair[0],
            Side::Right => &mut pair[1],
        })
    }

    /// Records a key press; non-modifier codes are ignored
    pub fn key_down(&mut self, code: &str) {
        if let Some(held) = self.slot(code) {
            *held = true;
        }
    }

    /// Records a key release; non-modifier codes are ignored
    pub fn key_up(&mut self, code: &str) {
        if let Some(held) = self.slot(code) {
            *held = false;
        }
    }

    /// Releases everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Canonical tokens of the held modifiers
    ///
    /// Order is fixed: `lctrl`, `rctrl`, `lshift`, `rshift`, `lalt`, `ralt`.
    pub fn held_tokens(&self) -> Vec<&'static str> {
        let table = [
            (self.ctrl, ["lctrl", "rctrl"]),
            (self.shift, ["lshift", "rshift"]),
            (self.alt, ["lalt", "ralt"]),
        ];

        table
            .iter()
            .flat_map(|(held, names)| {
                held.iter()
                    .zip(names.iter())
                    .filter(|(down, _)| **down)
                    .map(|(_, name)| *name)
            })
            .collect()
    }

    /// Joins the held modifiers in front of `token`
    pub fn prefix(&self, token: &str) -> String {
        let mut parts = self.held_tokens();
        parts.push(token);
        parts.join("+")
    }
}
