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

//! src/core/types.rs
//!
//! Core type definitions for action binding management
//!
//! This module defines the fundamental types used throughout the application:
//! - `DeviceClass`: The four input families an action can be bound on
//! - `ActivationMode`: The game's named activation semantics
//! - `BindSlot`: Current/default bind state for one device class
//! - `ActionRecord`: One game action with a slot per device class
//! - `ActionDefinition`: The raw attributes of an `<action>` in the base config
//!
//! Default fields of a slot are write-once: they are set at construction and
//! serve as the reset target for `clear`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::keywords::{auto_format_name, resolve_keywords, KeywordDictionary};

/// Input device family an action can be bound on
///
/// Each `ActionRecord` owns exactly one `BindSlot` per device class.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Keyboard keys (and mouse buttons captured from the keyboard view)
    Keyboard,
    /// Mouse buttons, wheel and axes
    Mouse,
    /// Gamepad / controller
    Controller,
    /// Joystick, HOTAS, throttle
    Joystick,
}

impl DeviceClass {
    /// All device classes in slot order
    pub const ALL: [DeviceClass; 4] = [
        DeviceClass::Keyboard,
        DeviceClass::Mouse,
        DeviceClass::Controller,
        DeviceClass::Joystick,
    ];

    /// Two-letter prefix used in exported bind strings (`kb1_w`)
    pub fn prefix(self) -> &'static str {
        match self {
            DeviceClass::Keyboard => "kb",
            DeviceClass::Mouse => "ms",
            DeviceClass::Controller => "gp",
            DeviceClass::Joystick => "js",
        }
    }

    /// Maps an exported prefix back to a device class (case-insensitive)
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "kb" => Some(DeviceClass::Keyboard),
            "ms" => Some(DeviceClass::Mouse),
            "gp" => Some(DeviceClass::Controller),
            "js" => Some(DeviceClass::Joystick),
            _ => None,
        }
    }

    /// Lowercase name, also the attribute name in the base config
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Keyboard => "keyboard",
            DeviceClass::Mouse => "mouse",
            DeviceClass::Controller => "controller",
            DeviceClass::Joystick => "joystick",
        }
    }

    fn index(self) -> usize {
        match self {
            DeviceClass::Keyboard => 0,
            DeviceClass::Mouse => 1,
            DeviceClass::Controller => 2,
            DeviceClass::Joystick => 3,
        }
    }

    /// Whether captures on this class go through the key/mouse state machine
    pub fn is_event_driven(self) -> bool {
        matches!(self, DeviceClass::Keyboard | DeviceClass::Mouse)
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyboard" | "kb" => Ok(DeviceClass::Keyboard),
            "mouse" | "ms" => Ok(DeviceClass::Mouse),
            "controller" | "gamepad" | "gp" => Ok(DeviceClass::Controller),
            "joystick" | "js" => Ok(DeviceClass::Joystick),
            other => Err(format!("unknown device class '{}'", other)),
        }
    }
}

/// Named activation semantics understood by the game
///
/// Slots store the mode as a plain string so that modes this enum does not
/// know about survive load/import/export unchanged. The enum covers the
/// choices offered when the user picks a mode explicitly.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ActivationMode {
    Press,
    Tap,
    DoubleTapNonBlocking,
    DoubleTap,
    DelayedPress,
    DelayedPressMedium,
    Hold,
    HoldNoRetrigger,
    SmartToggle,
}

impl ActivationMode {
    /// Modes in menu order
    pub const ALL: [ActivationMode; 9] = [
        ActivationMode::Press,
        ActivationMode::Tap,
        ActivationMode::DoubleTapNonBlocking,
        ActivationMode::DoubleTap,
        ActivationMode::DelayedPress,
        ActivationMode::DelayedPressMedium,
        ActivationMode::HoldNoRetrigger,
        ActivationMode::Hold,
        ActivationMode::SmartToggle,
    ];

    /// Attribute value written to the XML
    pub fn as_str(self) -> &'static str {
        match self {
            ActivationMode::Press => "press",
            ActivationMode::Tap => "tap",
            ActivationMode::DoubleTapNonBlocking => "double_tap_nonblocking",
            ActivationMode::DoubleTap => "double_tap",
            ActivationMode::DelayedPress => "delayed_press",
            ActivationMode::DelayedPressMedium => "delayed_press_medium",
            ActivationMode::Hold => "hold",
            ActivationMode::HoldNoRetrigger => "hold_no_retrigger",
            ActivationMode::SmartToggle => "smart_toggle",
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            ActivationMode::Press => "Press",
            ActivationMode::Tap => "Tap",
            ActivationMode::DoubleTapNonBlocking => "Double Tap (Non-Blocking)",
            ActivationMode::DoubleTap => "Double Tap (Blocking)",
            ActivationMode::DelayedPress => "Hold (Short)",
            ActivationMode::DelayedPressMedium => "Hold (Long)",
            ActivationMode::Hold => "While Held",
            ActivationMode::HoldNoRetrigger => "On release",
            ActivationMode::SmartToggle => "Smart Toggle",
        }
    }

    /// Looks up a mode by its attribute value
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name.trim())
    }
}

impl fmt::Display for ActivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's activation-mode menu choice
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActivationChoice {
    /// Restore the slot's default activation mode
    Default,
    /// Use this mode
    Mode(ActivationMode),
    /// Use an arbitrary mode name (passes through unvalidated)
    Named(String),
}

impl FromStr for ActivationChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("default") {
            return Ok(ActivationChoice::Default);
        }
        Ok(match ActivationMode::from_name(trimmed) {
            Some(mode) => ActivationChoice::Mode(mode),
            None => ActivationChoice::Named(trimmed.to_string()),
        })
    }
}

/// The mutable value group of a slot
///
/// `input`, `device_index` and `activation_mode` are always written
/// together; this is also the unit persisted to the state blob.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SlotState {
    /// Canonical bind tokens without device prefix, empty when unbound
    pub input: String,
    /// Which physical device of the class (1-based)
    pub device_index: u32,
    /// Activation mode name, empty when unset
    #[serde(default)]
    pub activation_mode: String,
}

/// Bind state for one device class of one action
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindSlot {
    bindable: bool,
    input: String,
    default_bind: String,
    device_index: u32,
    activation_mode: String,
    default_activation_mode: String,
}

impl BindSlot {
    /// Creates a slot whose current state equals its defaults
    pub fn new(bindable: bool, default_bind: &str, default_activation_mode: &str) -> Self {
        let default_bind = default_bind.trim().to_string();
        let default_activation_mode = default_activation_mode.trim().to_string();

        Self {
            bindable,
            input: default_bind.clone(),
            default_bind,
            device_index: 1,
            activation_mode: default_activation_mode.clone(),
            default_activation_mode,
        }
    }

    /// A slot the game does not accept input on
    pub fn unbindable() -> Self {
        Self::new(false, "", "")
    }

    pub fn is_bindable(&self) -> bool {
        self.bindable
    }

    /// Current bind, empty string when unbound
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_bound(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn default_bind(&self) -> &str {
        &self.default_bind
    }

    /// Device index, never less than 1
    pub fn device_index(&self) -> u32 {
        self.device_index.max(1)
    }

    pub fn activation_mode(&self) -> &str {
        &self.activation_mode
    }

    pub fn default_activation_mode(&self) -> &str {
        &self.default_activation_mode
    }

    /// Sets the bind and device index, keeping the activation mode
    pub fn set_input(&mut self, input: &str, device_index: u32) {
        let mode = self.activation_mode.clone();
        self.apply(SlotState {
            input: input.to_string(),
            device_index,
            activation_mode: mode,
        });
    }

    pub fn set_activation_mode(&mut self, mode: &str) {
        self.activation_mode = mode.trim().to_string();
    }

    /// Unbinds and restores device index 1 and the default activation mode
    pub fn clear(&mut self) {
        let mode = self.default_activation_mode.clone();
        self.apply(SlotState {
            input: String::new(),
            device_index: 1,
            activation_mode: mode,
        });
    }

    /// Current value group
    pub fn state(&self) -> SlotState {
        SlotState {
            input: self.input.clone(),
            device_index: self.device_index(),
            activation_mode: self.activation_mode.clone(),
        }
    }

    /// Value group as shipped with the base configuration
    pub fn default_state(&self) -> SlotState {
        SlotState {
            input: self.default_bind.clone(),
            device_index: 1,
            activation_mode: self.default_activation_mode.clone(),
        }
    }

    /// Writes the whole value group at once
    pub fn apply(&mut self, state: SlotState) {
        self.input = state.input.trim().to_string();
        self.device_index = state.device_index.max(1);
        self.activation_mode = state.activation_mode.trim().to_string();
    }

    /// `"<device>:<bind>"` as shown in the manual entry field, empty when unbound
    pub fn console_placeholder(&self) -> String {
        if self.input.is_empty() {
            String::new()
        } else {
            format!("{}:{}", self.device_index(), self.input)
        }
    }
}

/// Raw attributes of one `<action>` element of the base configuration
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ActionDefinition {
    pub name: String,
    pub map_name: String,
    /// `UICategory` of the enclosing action map
    pub ui_category: Option<String>,
    /// `UILabel` localisation key
    pub label: Option<String>,
    /// `UIDescription` localisation key
    pub description: Option<String>,
    /// `Category` attribute
    pub category: Option<String>,
    pub keyboard: Option<String>,
    pub mouse: Option<String>,
    pub gamepad: Option<String>,
    pub joystick: Option<String>,
    pub activation_mode: Option<String>,
}

impl ActionDefinition {
    /// Attribute value for a device class
    pub fn bind_attribute(&self, device: DeviceClass) -> Option<&str> {
        match device {
            DeviceClass::Keyboard => self.keyboard.as_deref(),
            DeviceClass::Mouse => self.mouse.as_deref(),
            DeviceClass::Controller => self.gamepad.as_deref(),
            DeviceClass::Joystick => self.joystick.as_deref(),
        }
    }
}

/// One game action and its binds on every device class
#[derive(Clone, Debug, PartialEq)]
pub struct ActionRecord {
    action_name: String,
    action_map_name: String,
    label: String,
    description: String,
    keyword_tags: Vec<String>,
    custom_name: Option<String>,
    slots: [BindSlot; 4],
}

impl ActionRecord {
    /// Builds a record from base-config attributes and the keyword dictionary
    ///
    /// A device class is bindable when its attribute is present and non-empty
    /// (a single space counts: the game uses it for "bindable, unbound").
    pub fn from_definition(definition: &ActionDefinition, dictionary: &KeywordDictionary) -> Self {
        let name = definition.name.as_str();
        let mode = definition.activation_mode.as_deref().unwrap_or("");

        let slots = DeviceClass::ALL.map(|device| match definition.bind_attribute(device) {
            Some(value) if !value.is_empty() => BindSlot::new(true, value, mode),
            _ => BindSlot::new(false, "", mode),
        });

        Self {
            action_name: name.to_string(),
            action_map_name: definition.map_name.clone(),
            label: dictionary
                .label(name)
                .map(str::to_string)
                .unwrap_or_else(|| auto_format_name(name)),
            description: dictionary
                .description(name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}: No description available.", name)),
            keyword_tags: build_keyword_tags(definition, dictionary),
            custom_name: None,
            slots,
        }
    }

    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    pub fn action_map_name(&self) -> &str {
        &self.action_map_name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Custom name if set, otherwise the label
    pub fn display_name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.label)
    }

    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    pub fn set_custom_name(&mut self, name: Option<String>) {
        self.custom_name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn keyword_tags(&self) -> &[String] {
        &self.keyword_tags
    }

    pub fn slot(&self, device: DeviceClass) -> &BindSlot {
        &self.slots[device.index()]
    }

    pub fn slot_mut(&mut self, device: DeviceClass) -> &mut BindSlot {
        &mut self.slots[device.index()]
    }

    /// Current bind for a device class, empty when unbound
    pub fn bind(&self, device: DeviceClass) -> &str {
        self.slot(device).input()
    }

    /// Sets the bind (trimmed) and device index of a slot
    pub fn set_bind(&mut self, device: DeviceClass, value: &str, device_index: u32) {
        self.slot_mut(device).set_input(value, device_index);
    }

    pub fn bind_device(&self, device: DeviceClass) -> u32 {
        self.slot(device).device_index()
    }

    pub fn set_bind_device(&mut self, device: DeviceClass, index: u32) {
        let slot = self.slot_mut(device);
        let input = slot.input().to_string();
        slot.set_input(&input, index);
    }

    pub fn activation_mode(&self, device: DeviceClass) -> &str {
        self.slot(device).activation_mode()
    }

    pub fn set_activation_mode(&mut self, device: DeviceClass, mode: &str) {
        self.slot_mut(device).set_activation_mode(mode);
    }

    pub fn default_activation_mode(&self, device: DeviceClass) -> &str {
        self.slot(device).default_activation_mode()
    }

    pub fn clear_bind(&mut self, device: DeviceClass) {
        self.slot_mut(device).clear();
    }

    /// True when any slot carries a bind
    pub fn has_any_bind(&self) -> bool {
        self.slots.iter().any(BindSlot::is_bound)
    }

    /// Whether the record is listed under a device-class view
    ///
    /// The keyboard view also lists mouse-only actions, since mouse buttons
    /// are captured from the keyboard view.
    pub fn is_visible_in(&self, device: DeviceClass) -> bool {
        self.slot(device).is_bindable()
            || (device == DeviceClass::Keyboard && self.slot(DeviceClass::Mouse).is_bindable())
    }
}

/// Merges dictionary keywords, category and map attributes into one tag list
///
/// Order of first appearance is kept; duplicates are dropped.
fn build_keyword_tags(definition: &ActionDefinition, dictionary: &KeywordDictionary) -> Vec<String> {
    let name = definition.name.as_str();
    let mut raw: Vec<String> = dictionary.keywords(name).to_vec();

    let category = definition.category.as_deref().map(str::trim).filter(|c| !c.is_empty());
    if category == Some("Emotes") {
        raw.push("emotes".to_string());
    }

    match definition.ui_category.as_deref().filter(|c| !c.is_empty()) {
        Some(ui_category) => raw.push(ui_category.to_string()),
        None if definition
            .label
            .as_deref()
            .is_some_and(|l| l.starts_with("@ui_CIMFD")) =>
        {
            raw.push("MFDs".to_string())
        }
        None => raw.push("none".to_string()),
    }

    let mut tags: indexmap::IndexSet<String> =
        resolve_keywords(&raw, name).into_iter().collect();

    if let Some(category) = category.filter(|c| *c != "Emotes") {
        tags.insert(category.to_string());
    }
    if !definition.map_name.is_empty() {
        tags.insert(definition.map_name.clone());
    }

    tags.into_iter().collect()
}
