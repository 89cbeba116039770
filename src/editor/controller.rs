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

//! Editor controller - mediates between the master list and whatever
//! front end drives it
//!
//! # Responsibilities
//!
//! - Device-class focus and row selection
//! - Capture lifecycle: keyboard/mouse sessions and controller/joystick
//!   poll tasks, with the shared five second countdown
//! - Manual entry, activation modes, clearing
//! - Import/export and replay of persisted state
//! - One change-hook call after every successful mutation
//!
//! # Architecture
//!
//! The controller knows nothing about windows or widgets. Input arrives as
//! `CaptureEvent`s, one-second ticks and `GamepadSnapshot` frames, all fed
//! synchronously in arrival order.

use crate::capture::{
    CaptureError, CaptureEvent, CaptureSession, CaptureTarget, ControllerPoller, Countdown,
    GamepadSnapshot, JoystickPoller, ModifierState, PollTask, SessionStep,
};
use crate::config::{PersistedState, ReplayReport};
use crate::core::parser::parse_manual_entry;
use crate::core::{
    has_conflict, ActionFilter, ActionList, ActionRecord, ActivationChoice, Conflict,
    ConflictDetector, DeviceClass, SearchIndex, SlotState,
};
use crate::editor::{BindChangeHook, CaptureUpdate, EditorError};
use crate::xml::{apply_import, export_profile, parse_import, ImportReport};

/// The capture currently in progress
enum ActiveCapture {
    /// Keyboard or mouse slot, fed by input events
    Session(CaptureSession),
    /// Controller or joystick slot, fed by poll frames
    Poll {
        target: CaptureTarget,
        countdown: Countdown,
    },
}

impl ActiveCapture {
    fn target(&self) -> &CaptureTarget {
        match self {
            ActiveCapture::Session(session) => session.target(),
            ActiveCapture::Poll { target, .. } => target,
        }
    }

    fn remaining(&self) -> u32 {
        match self {
            ActiveCapture::Session(session) => session.remaining(),
            ActiveCapture::Poll { countdown, .. } => countdown.remaining(),
        }
    }
}

/// The editor session
///
/// Owns the master list. Records are only mutated through methods that
/// finish by calling the change hook.
pub struct BindEditor {
    actions: ActionList,
    device: DeviceClass,
    selected: Option<String>,
    capture: Option<ActiveCapture>,
    modifiers: ModifierState,
    controller: ControllerPoller,
    joystick: JoystickPoller,
    hook: Box<dyn BindChangeHook>,
}

impl BindEditor {
    /// Creates an editor focused on the keyboard view
    pub fn new(actions: ActionList, hook: Box<dyn BindChangeHook>) -> Self {
        Self {
            actions,
            device: DeviceClass::Keyboard,
            selected: None,
            capture: None,
            modifiers: ModifierState::new(),
            controller: ControllerPoller::new(),
            joystick: JoystickPoller::new(),
            hook,
        }
    }

    pub fn actions(&self) -> &ActionList {
        &self.actions
    }

    pub fn record(&self, action_name: &str) -> Option<&ActionRecord> {
        self.actions.get(action_name)
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Switches the device-class focus
    ///
    /// Any active capture is cancelled and both poll tasks are stopped.
    pub fn set_device(&mut self, device: DeviceClass) {
        if self.device == device {
            return;
        }
        if let Some(active) = self.capture.take() {
            log::debug!(
                "Device focus changed, cancelling capture for {}",
                active.target().action_name
            );
        }
        self.stop_pollers();
        self.device = device;
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    // ------------------------------------------------------------------
    // Selection and queries
    // ------------------------------------------------------------------

    pub fn select(&mut self, action_name: &str) -> Result<&ActionRecord, EditorError> {
        let record = self
            .actions
            .get(action_name)
            .ok_or_else(|| EditorError::UnknownAction(action_name.to_string()))?;
        self.selected = Some(action_name.to_string());
        Ok(record)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ActionRecord> {
        self.selected.as_deref().and_then(|name| self.actions.get(name))
    }

    /// Whether another record shares this record's bind in the focused view
    pub fn has_conflict(&self, action_name: &str) -> bool {
        has_conflict(&self.actions, action_name, self.device)
    }

    /// Bind index of the focused view
    pub fn conflict_detector(&self) -> ConflictDetector {
        ConflictDetector::from_records(self.device, self.actions.iter())
    }

    /// All shared binds in the focused view
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.conflict_detector().find_conflicts()
    }

    /// Other records bound to the same input as `action_name` in the focused view
    pub fn sharing_bind(&self, action_name: &str) -> Vec<String> {
        let Some(record) = self.actions.get(action_name) else {
            return Vec::new();
        };
        self.conflict_detector()
            .actions_for(record.bind(self.device))
            .iter()
            .filter(|name| name.as_str() != action_name)
            .cloned()
            .collect()
    }

    /// Records shown in the focused view under `filter`
    pub fn filtered(&self, filter: &ActionFilter, search: &dyn SearchIndex) -> Vec<&ActionRecord> {
        filter.apply(&self.actions, self.device, search)
    }

    /// `"<device>:<bind>"` for the focused slot of a record
    pub fn console_placeholder(&self, action_name: &str) -> Option<String> {
        self.actions
            .get(action_name)
            .map(|r| r.slot(self.device).console_placeholder())
    }

    // ------------------------------------------------------------------
    // Capture
    // ------------------------------------------------------------------

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn capture_target(&self) -> Option<&CaptureTarget> {
        self.capture.as_ref().map(ActiveCapture::target)
    }

    /// Seconds left on the active capture's countdown
    pub fn capture_remaining(&self) -> Option<u32> {
        self.capture.as_ref().map(ActiveCapture::remaining)
    }

    /// Starts capturing a bind for the focused slot of `action_name`
    ///
    /// # Errors
    ///
    /// Rejected without touching any state when a capture is already
    /// running, the action is unknown, or the record is not shown in the
    /// focused view.
    pub fn start_capture(&mut self, action_name: &str) -> Result<(), CaptureError> {
        if let Some(active) = &self.capture {
            let target = active.target();
            return Err(CaptureError::AlreadyActive {
                action: target.action_name.clone(),
                device: target.device,
            });
        }

        let record = self
            .actions
            .get(action_name)
            .ok_or_else(|| CaptureError::UnknownAction(action_name.to_string()))?;
        if !record.is_visible_in(self.device) {
            return Err(CaptureError::NotBindable {
                action: action_name.to_string(),
                device: self.device,
            });
        }

        let target = CaptureTarget {
            action_name: action_name.to_string(),
            device: self.device,
        };
        log::debug!("Capture started for {} ({})", target.action_name, target.device);

        self.capture = Some(match self.device {
            DeviceClass::Keyboard | DeviceClass::Mouse => {
                ActiveCapture::Session(CaptureSession::new(target))
            }
            DeviceClass::Controller => {
                self.controller.start();
                ActiveCapture::Poll {
                    target,
                    countdown: Countdown::new(),
                }
            }
            DeviceClass::Joystick => {
                self.joystick.start();
                ActiveCapture::Poll {
                    target,
                    countdown: Countdown::new(),
                }
            }
        });
        self.selected = Some(action_name.to_string());
        Ok(())
    }

    /// Feeds one input event
    ///
    /// Modifier state is tracked for every event, capturing or not.
    pub fn handle_event(&mut self, event: &CaptureEvent) -> CaptureUpdate {
        match event {
            CaptureEvent::KeyDown { code, .. } => self.modifiers.key_down(code),
            CaptureEvent::KeyUp { code } => self.modifiers.key_up(code),
            _ => {}
        }

        let step = match self.capture.as_mut() {
            None => return CaptureUpdate::Ignored,
            Some(ActiveCapture::Poll { countdown, .. }) => {
                countdown.reset();
                return CaptureUpdate::Ignored;
            }
            Some(ActiveCapture::Session(session)) => session.handle(event),
        };

        match step {
            SessionStep::Ignored => CaptureUpdate::Ignored,
            SessionStep::Recording(preview) => CaptureUpdate::Recording { preview },
            SessionStep::Finished(Ok(bind)) => self.commit(bind, 1),
            SessionStep::Finished(Err(error)) => {
                let previous = self.end_capture_keep_previous();
                log::debug!("Capture rejected: {}", error);
                CaptureUpdate::Rejected { error, previous }
            }
        }
    }

    /// Feeds one frame of gamepad snapshots to the running poll task
    pub fn poll_frame(&mut self, snapshots: &[GamepadSnapshot]) -> CaptureUpdate {
        let device = match &self.capture {
            Some(ActiveCapture::Poll { target, .. }) => target.device,
            _ => return CaptureUpdate::Ignored,
        };

        let captured = match device {
            DeviceClass::Controller => self.controller.tick(snapshots, &self.modifiers),
            DeviceClass::Joystick => self.joystick.tick(snapshots, &self.modifiers),
            DeviceClass::Keyboard | DeviceClass::Mouse => None,
        };

        match captured {
            Some(input) => self.commit(input.bind, input.device_index),
            None => CaptureUpdate::Ignored,
        }
    }

    /// Advances the capture countdown by one second
    ///
    /// When it runs out the capture ends and the slot keeps its bind; the
    /// hook is not called.
    pub fn tick_second(&mut self) -> CaptureUpdate {
        let expired = match self.capture.as_mut() {
            None => return CaptureUpdate::Ignored,
            Some(ActiveCapture::Session(session)) => session.tick(),
            Some(ActiveCapture::Poll { countdown, .. }) => countdown.tick(),
        };

        if expired {
            let previous = self.end_capture_keep_previous();
            log::debug!("Capture timed out, keeping '{}'", previous);
            CaptureUpdate::TimedOut { previous }
        } else {
            CaptureUpdate::Waiting {
                remaining: self.capture_remaining().unwrap_or(0),
            }
        }
    }

    /// Abandons the active capture, leaving the slot as it was
    pub fn cancel_capture(&mut self) -> Result<CaptureTarget, CaptureError> {
        let active = self.capture.take().ok_or(CaptureError::NotCapturing)?;
        self.stop_pollers();
        let target = active.target().clone();
        log::debug!("Capture cancelled for {}", target.action_name);
        Ok(target)
    }

    fn stop_pollers(&mut self) {
        self.controller.stop();
        self.joystick.stop();
    }

    /// Ends the capture without writing and returns the slot's current bind
    fn end_capture_keep_previous(&mut self) -> String {
        self.stop_pollers();
        self.capture
            .take()
            .and_then(|active| {
                let target = active.target();
                self.actions
                    .get(&target.action_name)
                    .map(|r| r.bind(target.device).to_string())
            })
            .unwrap_or_default()
    }

    fn commit(&mut self, bind: String, device_index: u32) -> CaptureUpdate {
        self.stop_pollers();
        let Some(active) = self.capture.take() else {
            return CaptureUpdate::Ignored;
        };
        let target = active.target();

        let Some(record) = self.actions.get_mut(&target.action_name) else {
            return CaptureUpdate::Ignored;
        };
        record.set_bind(target.device, &bind, device_index);
        let slot = record.slot(target.device);
        let update = CaptureUpdate::Committed {
            bind: slot.input().to_string(),
            device_index: slot.device_index(),
        };
        log::info!(
            "Bound {} ({}) to '{}'",
            target.action_name,
            target.device,
            slot.input()
        );

        self.notify();
        update
    }

    // ------------------------------------------------------------------
    // Direct edits
    // ------------------------------------------------------------------

    fn notify(&mut self) {
        self.hook.bind_changed(&self.actions);
    }

    /// Drops a capture running on `action_name` before a direct edit of it
    fn cancel_capture_on(&mut self, action_name: &str) {
        if self
            .capture_target()
            .is_some_and(|t| t.action_name == action_name)
        {
            self.capture = None;
            self.stop_pollers();
            log::debug!("Capture on {} dropped for a direct edit", action_name);
        }
    }

    fn record_in_view(&mut self, action_name: &str) -> Result<&mut ActionRecord, EditorError> {
        let device = self.device;
        let record = self
            .actions
            .get_mut(action_name)
            .ok_or_else(|| EditorError::UnknownAction(action_name.to_string()))?;
        if !record.is_visible_in(device) {
            return Err(EditorError::NotBindable {
                action: action_name.to_string(),
                device,
            });
        }
        Ok(record)
    }

    /// Applies a typed `[<n>:]<bind>` entry to the focused slot
    ///
    /// The bind is taken verbatim; capture validation does not apply.
    pub fn apply_manual_entry(
        &mut self,
        action_name: &str,
        entry: &str,
    ) -> Result<SlotState, EditorError> {
        let parsed = parse_manual_entry(entry)?;
        let device = self.device;
        self.record_in_view(action_name)?;
        self.cancel_capture_on(action_name);

        let record = self.record_in_view(action_name)?;
        record.set_bind(device, &parsed.bind, parsed.device_index);
        let state = record.slot(device).state();
        log::info!("Manually bound {} ({}) to '{}'", action_name, device, state.input);

        self.notify();
        Ok(state)
    }

    /// Sets the focused slot's activation mode from a menu choice
    pub fn set_activation_mode(
        &mut self,
        action_name: &str,
        choice: &ActivationChoice,
    ) -> Result<String, EditorError> {
        let device = self.device;
        self.cancel_capture_on(action_name);

        let record = self.record_in_view(action_name)?;
        let mode = match choice {
            ActivationChoice::Default => record.default_activation_mode(device).to_string(),
            ActivationChoice::Mode(mode) => mode.as_str().to_string(),
            ActivationChoice::Named(name) => name.clone(),
        };
        record.set_activation_mode(device, &mode);
        let mode = record.activation_mode(device).to_string();

        self.notify();
        Ok(mode)
    }

    /// Unbinds the focused slot, restoring index 1 and the default mode
    pub fn clear_bind(&mut self, action_name: &str) -> Result<(), EditorError> {
        let device = self.device;
        self.cancel_capture_on(action_name);

        self.actions
            .get_mut(action_name)
            .ok_or_else(|| EditorError::UnknownAction(action_name.to_string()))?
            .clear_bind(device);
        log::info!("Cleared {} ({})", action_name, device);

        self.notify();
        Ok(())
    }

    /// Unbinds the focused slot of every record; returns how many were bound
    pub fn clear_all(&mut self) -> usize {
        if let Some(active) = self.capture.take() {
            log::debug!("Clear all cancels capture for {}", active.target().action_name);
        }
        self.stop_pollers();

        let device = self.device;
        let mut cleared = 0;
        for record in self.actions.iter_mut() {
            if record.slot(device).is_bound() {
                cleared += 1;
            }
            record.clear_bind(device);
        }
        log::info!("Cleared {} {} binds", cleared, device);

        self.notify();
        cleared
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Renders the current binds as a profile document
    pub fn export_xml(&self, profile_name: &str) -> Result<String, EditorError> {
        Ok(export_profile(&self.actions, profile_name)?)
    }

    /// Applies a profile document
    ///
    /// Malformed XML aborts before any record is touched. The hook runs
    /// once if any slot changed.
    pub fn import_xml(&mut self, content: &str) -> Result<ImportReport, EditorError> {
        let imported = parse_import(content)?;
        if let Some(active) = self.capture.take() {
            log::debug!("Import cancels capture for {}", active.target().action_name);
            self.stop_pollers();
        }

        let report = apply_import(&mut self.actions, &imported);
        if report.changed {
            self.notify();
        }
        Ok(report)
    }

    /// Replays persisted slots over the base records without notifying
    pub fn replay_state(&mut self, state: &PersistedState) -> ReplayReport {
        state.replay(&mut self.actions)
    }

    /// Gives the master list back, e.g. for a final export
    pub fn into_actions(self) -> ActionList {
        self.actions
    }
}
