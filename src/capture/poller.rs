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

//! src/capture/poller.rs
//!
//! Controller and joystick poll tasks
//!
//! Gamepads have no events, only state. A poll task is started when a
//! capture begins, then ticked once per frame with a snapshot of every
//! connected device until it reports an input or is stopped. A stopped task
//! ignores ticks, so a late frame after a commit cannot write a second bind.
//!
//! # Controller
//! Sticks are read against a fixed 0.5 deadzone on the dominant axis.
//! Scan order per device: left stick, right stick, buttons (lowest index
//! first). The first hit wins.
//!
//! # Joystick
//! Joystick axes rarely rest at zero, so every axis is compared with its
//! value from the previous frame (deadzone 0.02). The slider is compared
//! with the value it had when polling started. The first tick after
//! `start` only records those baselines.

use std::collections::HashMap;
use std::fmt;

use crate::capture::ModifierState;

/// Stick deadzone for controllers
pub const CONTROLLER_DEADZONE: f64 = 0.5;

/// Frame-to-frame jitter threshold for joystick axes
pub const JOYSTICK_DEADZONE: f64 = 0.02;

const AXIS_STICK_X: usize = 0;
const AXIS_STICK_Y: usize = 1;
const AXIS_TWIST: usize = 5;
const AXIS_SLIDER: usize = 6;
const AXIS_HAT: usize = 9;

/// State of one connected gamepad at one instant
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Slot the platform assigned to the device (0-based)
    pub index: usize,
    pub axes: Vec<f64>,
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    fn axis(&self, i: usize) -> f64 {
        self.axes.get(i).copied().unwrap_or(0.0)
    }
}

/// An input produced by a poll task
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedInput {
    /// Canonical bind including any held keyboard modifiers
    pub bind: String,
    /// Which physical device of the class (1-based)
    pub device_index: u32,
}

/// A cancelable per-frame polling job
pub trait PollTask {
    /// Arms the task; the next tick starts a fresh scan
    fn start(&mut self);

    /// Examines one frame of snapshots
    ///
    /// Returns `None` while nothing qualifies or when the task is stopped.
    fn tick(
        &mut self,
        snapshots: &[GamepadSnapshot],
        modifiers: &ModifierState,
    ) -> Option<CapturedInput>;

    /// Disarms the task; further ticks do nothing
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// Controller button index → canonical name
pub fn controller_button_name(index: usize) -> String {
    let name = match index {
        0 => "a",
        1 => "b",
        2 => "x",
        3 => "y",
        4 => "shoulderl",
        5 => "shoulderr",
        6 => "triggerl_btn",
        7 => "triggerr_btn",
        8 => "back",
        9 => "start",
        10 => "thumbl",
        11 => "thumbr",
        12 => "dpad_up",
        13 => "dpad_down",
        14 => "dpad_left",
        15 => "dpad_right",
        other => return other.to_string(),
    };
    name.to_string()
}

/// Direction of a stick on its dominant axis, `None` inside the deadzone
fn stick_direction(x: f64, y: f64, deadzone: f64) -> Option<&'static str> {
    if x.abs() <= deadzone && y.abs() <= deadzone {
        return None;
    }
    let direction = if x.abs() > y.abs() {
        if x > 0.0 {
            "right"
        } else {
            "left"
        }
    } else if y > 0.0 {
        "down"
    } else {
        "up"
    };
    Some(direction)
}

/// Polls controllers for a stick deflection or button press
#[derive(Debug, Default)]
pub struct ControllerPoller {
    running: bool,
}

impl ControllerPoller {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan(snapshot: &GamepadSnapshot) -> Option<String> {
        let sticks = [("thumbl", 0, 1), ("thumbr", 2, 3)];
        for (stick, x, y) in sticks {
            if let Some(direction) =
                stick_direction(snapshot.axis(x), snapshot.axis(y), CONTROLLER_DEADZONE)
            {
                return Some(format!("{}_{}", stick, direction));
            }
        }

        snapshot
            .buttons
            .iter()
            .position(|pressed| *pressed)
            .map(controller_button_name)
    }
}

impl PollTask for ControllerPoller {
    fn start(&mut self) {
        self.running = true;
    }

    fn tick(
        &mut self,
        snapshots: &[GamepadSnapshot],
        modifiers: &ModifierState,
    ) -> Option<CapturedInput> {
        if !self.running {
            return None;
        }

        let token = snapshots.iter().find_map(Self::scan)?;
        log::debug!("Controller input '{}'", token);
        Some(CapturedInput {
            bind: modifiers.prefix(&token),
            device_index: 1,
        })
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// What moved on a joystick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JoystickSignal {
    /// Main stick, horizontal (`x`) or vertical (`y`) dominant
    Stick {
        horizontal: bool,
        direction: &'static str,
    },
    /// Twist/rudder axis
    Twist { positive: bool },
    /// Hat switch, thresholded into four directions
    Hat(&'static str),
    /// Throttle slider, relative to its resting position
    Slider { direction: &'static str },
    /// Any other axis; reported so unusual hardware is visible
    UnknownAxis(usize),
    /// Digital button (0-based index)
    Button(usize),
}

impl JoystickSignal {
    /// Canonical token for the signal
    pub fn token(&self) -> String {
        match self {
            JoystickSignal::Stick { horizontal: true, .. } => "x".to_string(),
            JoystickSignal::Stick { horizontal: false, .. } => "y".to_string(),
            JoystickSignal::Twist { .. } => "rotz".to_string(),
            JoystickSignal::Hat(direction) => format!("hat1_{}", direction),
            JoystickSignal::Slider { .. } => "slider1".to_string(),
            JoystickSignal::UnknownAxis(i) => format!("unknown_axis{}", i),
            JoystickSignal::Button(i) => format!("button{}", i + 1),
        }
    }
}

impl fmt::Display for JoystickSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoystickSignal::Stick { direction, .. } => write!(f, "stick {}", direction),
            JoystickSignal::Twist { positive } => {
                write!(f, "twist {}", if *positive { "+" } else { "-" })
            }
            JoystickSignal::Hat(direction) => write!(f, "hat {}", direction),
            JoystickSignal::Slider { direction } => write!(f, "slider {}", direction),
            JoystickSignal::UnknownAxis(i) => write!(f, "unknown axis {}", i),
            JoystickSignal::Button(i) => write!(f, "button {}", i + 1),
        }
    }
}

/// Hat axis value → direction
fn hat_direction(value: f64) -> Option<&'static str> {
    if value < -0.5 {
        Some("up")
    } else if value > 0.5 {
        Some("left")
    } else if value > 0.0 {
        Some("down")
    } else if value < 0.0 {
        Some("right")
    } else {
        None
    }
}

/// Per-device calibration
#[derive(Clone, Debug, Default)]
struct Baseline {
    previous_axes: Vec<f64>,
    slider: f64,
}

/// Polls joysticks for axis movement or button presses
#[derive(Debug, Default)]
pub struct JoystickPoller {
    running: bool,
    baselines: HashMap<usize, Baseline>,
}

impl JoystickPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether baselines have been recorded for a device
    pub fn is_calibrated(&self, index: usize) -> bool {
        self.baselines.contains_key(&index)
    }

    /// First qualifying signal of one device, comparing against `baseline`
    fn scan(snapshot: &GamepadSnapshot, baseline: &Baseline) -> Option<JoystickSignal> {
        for (i, &value) in snapshot.axes.iter().enumerate() {
            let previous = baseline.previous_axes.get(i).copied().unwrap_or(0.0);
            if (value - previous).abs() <= JOYSTICK_DEADZONE {
                continue;
            }
            log::debug!("Device {}: axis {} = {:.2}", snapshot.index, i, value);

            let signal = match i {
                AXIS_STICK_X | AXIS_STICK_Y => {
                    let x = snapshot.axis(AXIS_STICK_X);
                    let y = snapshot.axis(AXIS_STICK_Y);
                    stick_direction(x, y, JOYSTICK_DEADZONE).map(|direction| {
                        JoystickSignal::Stick {
                            horizontal: x.abs() > y.abs(),
                            direction,
                        }
                    })
                }
                AXIS_TWIST if value.abs() > JOYSTICK_DEADZONE => Some(JoystickSignal::Twist {
                    positive: value > 0.0,
                }),
                AXIS_TWIST => None,
                AXIS_HAT => hat_direction(value).map(JoystickSignal::Hat),
                AXIS_SLIDER if (value - baseline.slider).abs() > JOYSTICK_DEADZONE => {
                    let direction = if value > baseline.slider { "down" } else { "up" };
                    log::debug!(
                        "Device {}: slider moved {} (baseline {:.2}, current {:.2})",
                        snapshot.index,
                        direction,
                        baseline.slider,
                        value
                    );
                    Some(JoystickSignal::Slider { direction })
                }
                AXIS_SLIDER => None,
                other => Some(JoystickSignal::UnknownAxis(other)),
            };

            if signal.is_some() {
                return signal;
            }
        }

        snapshot
            .buttons
            .iter()
            .position(|pressed| *pressed)
            .map(JoystickSignal::Button)
    }
}

impl PollTask for JoystickPoller {
    fn start(&mut self) {
        self.running = true;
        self.baselines.clear();
    }

    fn tick(
        &mut self,
        snapshots: &[GamepadSnapshot],
        modifiers: &ModifierState,
    ) -> Option<CapturedInput> {
        if !self.running {
            return None;
        }

        let mut found = None;
        for snapshot in snapshots {
            match self.baselines.get_mut(&snapshot.index) {
                None => {
                    log::debug!(
                        "Device {}: slider baseline = {:.2}",
                        snapshot.index,
                        snapshot.axis(AXIS_SLIDER)
                    );
                    self.baselines.insert(
                        snapshot.index,
                        Baseline {
                            previous_axes: snapshot.axes.clone(),
                            slider: snapshot.axis(AXIS_SLIDER),
                        },
                    );
                }
                Some(baseline) => {
                    if found.is_none() {
                        found = Self::scan(snapshot, baseline).map(|signal| (signal, snapshot.index));
                    }
                    baseline.previous_axes = snapshot.axes.clone();
                }
            }
        }

        let (signal, index) = found?;
        log::debug!("Joystick {} input: {}", index + 1, signal);
        Some(CapturedInput {
            bind: modifiers.prefix(&signal.token()),
            device_index: u32::try_from(index + 1).unwrap_or(u32::MAX),
        })
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
