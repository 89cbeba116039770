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

//! Persisted bind state
//!
//! The state blob stores only slots that differ from the base
//! configuration, keyed by action name and device class:
//!
//! ```json
//! {
//!   "version": 1,
//!   "actions": {
//!     "v_strafe_up": {
//!       "keyboard": { "input": "s", "device_index": 1, "activation_mode": "" }
//!     }
//!   }
//! }
//! ```
//!
//! Replaying the blob over a freshly loaded base list restores every edit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::core::{ActionList, DeviceClass, SlotState};

/// Layout version written by this build
pub const STATE_VERSION: u32 = 1;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PersistedState {
    pub version: u32,
    #[serde(default)]
    pub actions: BTreeMap<String, BTreeMap<DeviceClass, SlotState>>,
}

/// Outcome of replaying a state blob
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReplayReport {
    /// Number of slots written
    pub slots: usize,
    /// Actions in the blob that the base configuration no longer has
    pub unknown: Vec<String>,
}

impl PersistedState {
    /// Snapshot of every slot that differs from its base configuration value
    pub fn capture(list: &ActionList) -> Self {
        let mut actions = BTreeMap::new();

        for record in list.iter() {
            let changed: BTreeMap<DeviceClass, SlotState> = DeviceClass::ALL
                .iter()
                .map(|&device| (device, record.slot(device)))
                .filter(|(_, slot)| slot.state() != slot.default_state())
                .map(|(device, slot)| (device, slot.state()))
                .collect();

            if !changed.is_empty() {
                actions.insert(record.action_name().to_string(), changed);
            }
        }

        Self {
            version: STATE_VERSION,
            actions,
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let state: PersistedState = serde_json::from_str(content)?;
        if state.version > STATE_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: state.version,
                supported: STATE_VERSION,
            });
        }
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the stored slots onto matching records
    ///
    /// Unknown actions are logged and skipped.
    pub fn replay(&self, list: &mut ActionList) -> ReplayReport {
        let mut report = ReplayReport::default();

        for (name, slots) in &self.actions {
            let Some(record) = list.get_mut(name) else {
                log::warn!("Stored binds for unknown action '{}' skipped", name);
                report.unknown.push(name.clone());
                continue;
            };

            for (&device, state) in slots {
                record.slot_mut(device).apply(state.clone());
                report.slots += 1;
            }
        }

        log::info!(
            "Restored {} slots ({} unknown actions)",
            report.slots,
            report.unknown.len()
        );
        report
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
