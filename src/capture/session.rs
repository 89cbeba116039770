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

//! src/capture/session.rs
//!
//! Keyboard/mouse capture state machine
//!
//! A session records raw codes in arrival order and keeps a live set of
//! keys currently held. Rules while recording:
//! - Auto-repeat, duplicates and Meta keys are ignored
//! - Modifiers stack, one per ctrl/shift/alt family, and only before a
//!   normal key
//! - A new normal key replaces the previous one
//! - A mouse press finishes the session unless a normal key is held
//! - A wheel step finishes the session, replacing any earlier wheel step
//! - Releasing the last live key finishes the session
//!
//! Finishing validates the whole sequence and yields either the canonical
//! bind or the rejection reason. The session itself never touches a record.

use std::collections::HashSet;

use crate::capture::{CaptureEvent, CaptureTarget, Countdown};
use crate::core::translator::{classify, mouse_button_code, translate, InputKind, ModifierGroup};
use crate::core::validator::{validate_combination, ValidationError};

const WHEEL_UP: &str = "mwheel_up";
const WHEEL_DOWN: &str = "mwheel_down";

/// Result of feeding one event to a session
#[derive(Clone, Debug, PartialEq)]
pub enum SessionStep {
    /// Event had no effect
    Ignored,
    /// Still recording; carries the bind as captured so far
    Recording(String),
    /// Session is over; the validated canonical bind or why it was rejected
    Finished(Result<String, ValidationError>),
}

/// An in-progress keyboard/mouse capture
#[derive(Clone, Debug)]
pub struct CaptureSession {
    target: CaptureTarget,
    ordered: Vec<String>,
    live: HashSet<String>,
    countdown: Countdown,
}

impl CaptureSession {
    pub fn new(target: CaptureTarget) -> Self {
        Self {
            target,
            ordered: Vec::new(),
            live: HashSet::new(),
            countdown: Countdown::new(),
        }
    }

    pub fn target(&self) -> &CaptureTarget {
        &self.target
    }

    /// Raw codes recorded so far, in order
    pub fn codes(&self) -> &[String] {
        &self.ordered
    }

    /// Seconds left before the session times out
    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Advances the countdown; `true` once it has run out
    pub fn tick(&mut self) -> bool {
        self.countdown.tick()
    }

    /// Canonical bind for the codes recorded so far
    pub fn preview(&self) -> String {
        canonical_bind(&self.ordered)
    }

    /// Processes one input event
    ///
    /// The countdown is reset before the event is looked at, so a timeout
    /// can never land in the middle of an event.
    pub fn handle(&mut self, event: &CaptureEvent) -> SessionStep {
        self.countdown.reset();

        match event {
            CaptureEvent::KeyDown { code, repeat } => self.key_down(code, *repeat),
            CaptureEvent::KeyUp { code } => self.key_up(code),
            CaptureEvent::MouseDown { button } => self.mouse_down(*button),
            CaptureEvent::Wheel { delta_y } => self.wheel(*delta_y),
        }
    }

    fn key_down(&mut self, code: &str, repeat: bool) -> SessionStep {
        if repeat || self.live.contains(code) {
            return SessionStep::Ignored;
        }

        match classify(code) {
            InputKind::Modifier(ModifierGroup::Meta) => return SessionStep::Ignored,
            InputKind::Modifier(group) => {
                if self.has_normal_key() || self.has_modifier_in(group) {
                    return SessionStep::Ignored;
                }
            }
            InputKind::MouseButton | InputKind::Normal => {
                let previous: Vec<String> = self
                    .ordered
                    .iter()
                    .filter(|c| classify(c) == InputKind::Normal)
                    .cloned()
                    .collect();
                for replaced in previous {
                    log::debug!("Replacing '{}' with '{}'", replaced, code);
                    self.live.remove(&replaced);
                    self.ordered.retain(|c| *c != replaced);
                }
            }
        }

        self.push(code);
        SessionStep::Recording(self.preview())
    }

    fn key_up(&mut self, code: &str) -> SessionStep {
        if !self.live.remove(code) {
            return SessionStep::Ignored;
        }

        if self.live.is_empty() {
            self.finish()
        } else {
            SessionStep::Recording(self.preview())
        }
    }

    fn mouse_down(&mut self, button: u8) -> SessionStep {
        if self
            .live
            .iter()
            .any(|c| !matches!(classify(c), InputKind::Modifier(_)))
        {
            log::debug!("Mouse button {} ignored while a key is held", button);
            return SessionStep::Ignored;
        }

        let Some(code) = mouse_button_code(button) else {
            return SessionStep::Ignored;
        };

        self.push(code);
        self.finish()
    }

    fn wheel(&mut self, delta_y: f64) -> SessionStep {
        let direction = if delta_y < 0.0 { WHEEL_UP } else { WHEEL_DOWN };

        self.ordered.retain(|c| c != WHEEL_UP && c != WHEEL_DOWN);
        self.push(direction);
        self.finish()
    }

    fn push(&mut self, code: &str) {
        self.live.insert(code.to_string());
        self.ordered.push(code.to_string());
    }

    fn has_normal_key(&self) -> bool {
        self.ordered.iter().any(|c| classify(c) == InputKind::Normal)
    }

    fn has_modifier_in(&self, group: ModifierGroup) -> bool {
        self.ordered
            .iter()
            .any(|c| classify(c) == InputKind::Modifier(group))
    }

    fn finish(&mut self) -> SessionStep {
        let result = validate_combination(&self.ordered).map(|()| self.preview());
        match &result {
            Ok(bind) => log::debug!("Captured '{}' for {}", bind, self.target.action_name),
            Err(e) => log::debug!("Rejected capture for {}: {}", self.target.action_name, e),
        }
        self.live.clear();
        SessionStep::Finished(result)
    }
}

/// Translates, joins with `+` and lower-cases a code sequence
pub fn canonical_bind(codes: &[String]) -> String {
    codes
        .iter()
        .map(|c| translate(c))
        .collect::<Vec<_>>()
        .join("+")
        .to_lowercase()
}
