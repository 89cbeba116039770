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

//! The master list of action records
//!
//! Records keep their load order and are looked up by `action_name`.
//! Nothing is ever removed during a session.

use std::collections::HashMap;

use crate::core::types::ActionRecord;

/// Ordered, name-keyed collection of every known action
#[derive(Clone, Debug, Default)]
pub struct ActionList {
    records: Vec<ActionRecord>,
    positions: HashMap<String, usize>,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing an earlier record of the same name in place
    ///
    /// Returns `true` when an existing record was replaced.
    pub fn upsert(&mut self, record: ActionRecord) -> bool {
        match self.positions.get(record.action_name()) {
            Some(&pos) => {
                self.records[pos] = record;
                true
            }
            None => {
                self.positions
                    .insert(record.action_name().to_string(), self.records.len());
                self.records.push(record);
                false
            }
        }
    }

    pub fn get(&self, action_name: &str) -> Option<&ActionRecord> {
        self.positions.get(action_name).map(|&pos| &self.records[pos])
    }

    pub fn get_mut(&mut self, action_name: &str) -> Option<&mut ActionRecord> {
        match self.positions.get(action_name) {
            Some(&pos) => Some(&mut self.records[pos]),
            None => None,
        }
    }

    pub fn contains(&self, action_name: &str) -> bool {
        self.positions.contains_key(action_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActionRecord> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ActionRecord> for ActionList {
    fn from_iter<T: IntoIterator<Item = ActionRecord>>(iter: T) -> Self {
        let mut list = ActionList::new();
        for record in iter {
            list.upsert(record);
        }
        list
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a ActionRecord;
    type IntoIter = std::slice::Iter<'a, ActionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
