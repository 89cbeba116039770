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

//! Profile import
//!
//! Import runs in two phases. `parse_import` reads the whole document into
//! plain values and fails without side effects on malformed XML.
//! `apply_import` then writes those values onto existing records only.
//! Actions the master list does not know are reported, never inserted.

use std::collections::BTreeMap;
use std::{fs, path::Path};

use crate::core::parser::parse_bind_string;
use crate::core::{ActionList, ActivationMode, DeviceClass, SlotState};
use crate::xml::ImportError;

/// One `<rebind>` of an imported action
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportedRebind {
    pub device: DeviceClass,
    pub device_index: u32,
    /// Empty for an explicit unbind
    pub bind: String,
    /// Empty when the element carried no mode
    pub activation_mode: String,
}

impl ImportedRebind {
    fn state(&self) -> SlotState {
        SlotState {
            input: self.bind.clone(),
            device_index: self.device_index,
            activation_mode: self.activation_mode.clone(),
        }
    }
}

/// One `<action>` of an imported profile
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportedAction {
    pub action_name: String,
    pub map_name: String,
    /// Last rebind seen per device class
    pub rebinds: BTreeMap<DeviceClass, ImportedRebind>,
}

/// Outcome of applying an import
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ImportReport {
    /// Actions found in the master list and updated
    pub applied: Vec<String>,
    /// Actions in the file that the master list does not contain
    pub not_found: Vec<String>,
    /// Whether any slot value actually changed
    pub changed: bool,
}

/// Activation mode of a `<rebind>`
///
/// An explicit `activationMode` wins. A `multiTap` count without a mode is
/// the legacy spelling of a blocking double tap.
fn rebind_activation_mode(rebind: roxmltree::Node<'_, '_>) -> String {
    match rebind.attribute("activationMode").filter(|m| !m.is_empty()) {
        Some(mode) => mode.to_string(),
        None if rebind.attribute("multiTap").is_some() => {
            ActivationMode::DoubleTap.as_str().to_string()
        }
        None => String::new(),
    }
}

/// Reads a profile document without touching any record
pub fn parse_import(content: &str) -> Result<Vec<ImportedAction>, ImportError> {
    let document =
        roxmltree::Document::parse(content).map_err(|e| ImportError::Xml(e.to_string()))?;

    let mut actions = Vec::new();

    for map in document
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("actionmap"))
    {
        let map_name = map.attribute("name").unwrap_or_default();

        for action in map
            .children()
            .filter(|n| n.is_element() && n.has_tag_name("action"))
        {
            let Some(action_name) = action.attribute("name").filter(|n| !n.is_empty()) else {
                continue;
            };

            let mut rebinds = BTreeMap::new();
            for rebind in action
                .descendants()
                .filter(|n| n.is_element() && n.has_tag_name("rebind"))
            {
                let Some(input) = rebind.attribute("input").filter(|i| !i.is_empty()) else {
                    continue;
                };

                // `kb1_` carries nothing; `kb1_ ` is the game's explicit unbind
                let parsed = parse_bind_string(input);
                if parsed.bind.is_empty() {
                    log::debug!("Skipping empty rebind '{}' on {}", input, action_name);
                    continue;
                }

                rebinds.insert(
                    parsed.device,
                    ImportedRebind {
                        device: parsed.device,
                        device_index: parsed.device_index.unwrap_or(1).max(1),
                        bind: parsed.bind.trim().to_string(),
                        activation_mode: rebind_activation_mode(rebind),
                    },
                );
            }

            actions.push(ImportedAction {
                action_name: action_name.to_string(),
                map_name: map_name.to_string(),
                rebinds,
            });
        }
    }

    Ok(actions)
}

/// Reads and parses a profile file
pub fn read_import(path: &Path) -> Result<Vec<ImportedAction>, ImportError> {
    let content = fs::read_to_string(path).map_err(|e| ImportError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_import(&content)
}

/// Writes imported rebinds onto the matching records
///
/// Each rebind replaces the slot's whole value group; a blank bind unbinds
/// the slot. Unknown actions are logged and listed in the report; the rest
/// of the file still applies.
pub fn apply_import(list: &mut ActionList, imported: &[ImportedAction]) -> ImportReport {
    let mut report = ImportReport::default();

    for action in imported {
        let Some(record) = list.get_mut(&action.action_name) else {
            log::warn!(
                "Imported action '{}' ({}) not found in base configuration",
                action.action_name,
                action.map_name
            );
            report.not_found.push(action.action_name.clone());
            continue;
        };

        for rebind in action.rebinds.values() {
            let slot = record.slot_mut(rebind.device);
            if !slot.is_bindable() {
                log::debug!(
                    "Importing {} bind onto non-bindable slot of {}",
                    rebind.device,
                    action.action_name
                );
            }
            let before = slot.state();
            slot.apply(rebind.state());
            report.changed |= slot.state() != before;
        }
        report.applied.push(action.action_name.clone());
    }

    log::info!(
        "Imported {} actions ({} not found)",
        report.applied.len(),
        report.not_found.len()
    );
    report
}
