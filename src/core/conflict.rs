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

//! Bind conflict detection
//!
//! Two actions conflict on a device class when their trimmed binds are equal
//! and non-empty. The device index is not part of the comparison, and
//! conflicts are never resolved automatically: sharing an input is often
//! intentional in the game's layered action maps.
//!
//! # Performance
//! - `has_conflict`: O(n) scan of the master list
//! - `ConflictDetector::add_record`: O(1) average case
//! - `find_conflicts`: O(k) where k = number of distinct binds

use indexmap::IndexMap;

use crate::core::action_list::ActionList;
use crate::core::types::{ActionRecord, DeviceClass};

/// A group of actions sharing one bind on one device class
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// The shared bind
    pub bind: String,

    /// Names of every action using it (always 2 or more), in list order
    pub action_names: Vec<String>,
}

/// Groups records by bind for one device class
///
/// Groups keep first-appearance order so listings are stable between runs.
pub struct ConflictDetector {
    device: DeviceClass,
    binds: IndexMap<String, Vec<String>>,
}

impl ConflictDetector {
    /// Creates an empty detector for one device class
    pub fn new(device: DeviceClass) -> Self {
        Self {
            device,
            binds: IndexMap::new(),
        }
    }

    /// Builds a detector over every record of a list
    pub fn from_records<'a>(
        device: DeviceClass,
        records: impl IntoIterator<Item = &'a ActionRecord>,
    ) -> Self {
        let mut detector = Self::new(device);
        for record in records {
            detector.add_record(record);
        }
        detector
    }

    /// Tracks a record's bind; unbound records are skipped
    pub fn add_record(&mut self, record: &ActionRecord) {
        let bind = record.bind(self.device).trim();
        if bind.is_empty() {
            return;
        }
        self.binds
            .entry(bind.to_string())
            .or_default()
            .push(record.action_name().to_string());
    }

    /// All binds used by 2 or more actions
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        self.binds
            .iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(bind, names)| Conflict {
                bind: bind.clone(),
                action_names: names.clone(),
            })
            .collect()
    }

    /// Names of the actions using `bind`, empty when none do
    pub fn actions_for(&self, bind: &str) -> &[String] {
        self.binds
            .get(bind.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of bound records tracked
    pub fn total_binds(&self) -> usize {
        self.binds.values().map(Vec::len).sum()
    }
}

/// Whether another action uses the same bind as `action_name` on `device`
///
/// Unknown actions and unbound slots never conflict.
pub fn has_conflict(list: &ActionList, action_name: &str, device: DeviceClass) -> bool {
    let Some(record) = list.get(action_name) else {
        return false;
    };

    let bind = record.bind(device).trim();
    if bind.is_empty() {
        return false;
    }

    list.iter().any(|other| {
        other.action_name() != action_name && other.bind(device).trim() == bind
    })
}
