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

//! src/capture/mod.rs
//!
//! Keybind capture
//!
//! Turns live input into a bind for one action slot:
//! - `session`: key/mouse/wheel state machine for keyboard and mouse slots
//! - `poller`: cancelable poll tasks for controller and joystick slots
//! - `modifiers`: left/right modifier tracking independent of any capture
//!
//! Everything here is synchronous. Callers feed events, one-second ticks and
//! gamepad snapshots in arrival order; nothing runs in the background.

pub mod modifiers;
pub mod poller;
pub mod session;

pub use modifiers::ModifierState;
pub use poller::{
    CapturedInput, ControllerPoller, GamepadSnapshot, JoystickPoller, JoystickSignal, PollTask,
};
pub use session::{CaptureSession, SessionStep};

use thiserror::Error;

use crate::core::types::DeviceClass;

/// Seconds a capture waits for input before giving up
pub const CAPTURE_TIMEOUT_SECS: u32 = 5;

/// A raw input event delivered while the editor is running
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureEvent {
    /// Physical key pressed; `repeat` is set for auto-repeat
    KeyDown { code: String, repeat: bool },
    /// Physical key released
    KeyUp { code: String },
    /// Mouse button pressed (0 = left, 1 = middle, 2 = right, 3/4 = side)
    MouseDown { button: u8 },
    /// Wheel scrolled; negative is away from the user
    Wheel { delta_y: f64 },
}

impl CaptureEvent {
    pub fn key_down(code: &str) -> Self {
        CaptureEvent::KeyDown {
            code: code.to_string(),
            repeat: false,
        }
    }

    pub fn key_up(code: &str) -> Self {
        CaptureEvent::KeyUp {
            code: code.to_string(),
        }
    }
}

/// The slot a capture writes to
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaptureTarget {
    pub action_name: String,
    pub device: DeviceClass,
}

/// Capture misuse
#[derive(Debug, Error, PartialEq)]
pub enum CaptureError {
    #[error("A capture is already active for '{action}' ({device})")]
    AlreadyActive { action: String, device: DeviceClass },

    #[error("Action '{0}' not found")]
    UnknownAction(String),

    #[error("Action '{action}' cannot be bound on {device}")]
    NotBindable { action: String, device: DeviceClass },

    #[error("No capture is active")]
    NotCapturing,
}

/// One-second countdown of an active capture
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: CAPTURE_TIMEOUT_SECS,
        }
    }

    /// Back to the full timeout
    pub fn reset(&mut self) {
        self.remaining = CAPTURE_TIMEOUT_SECS;
    }

    /// Advances one second; `true` once the countdown has run out
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
