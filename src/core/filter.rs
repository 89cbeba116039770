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

//! src/core/filter.rs
//!
//! Action list filtering
//!
//! Filters are applied in a fixed order over the records visible in the
//! current device view:
//! 1. Bound / unbound tri-state
//! 2. Tags (any selected tag matches, case-insensitive)
//! 3. Search query through a `SearchIndex`
//! 4. Conflicts only: records regrouped by shared bind

use indexmap::IndexMap;
use std::fmt;

use crate::core::action_list::ActionList;
use crate::core::types::{ActionRecord, DeviceClass};

/// Tri-state bound filter
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BoundFilter {
    #[default]
    All,
    Bound,
    Unbound,
}

impl BoundFilter {
    /// Next state in the toggle cycle (all → bound → unbound → all)
    pub fn cycle(self) -> Self {
        match self {
            BoundFilter::All => BoundFilter::Bound,
            BoundFilter::Bound => BoundFilter::Unbound,
            BoundFilter::Unbound => BoundFilter::All,
        }
    }

    fn accepts(self, record: &ActionRecord, device: DeviceClass) -> bool {
        let bound = !record.bind(device).trim().is_empty();
        match self {
            BoundFilter::All => true,
            BoundFilter::Bound => bound,
            BoundFilter::Unbound => !bound,
        }
    }
}

impl fmt::Display for BoundFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BoundFilter::All => "All actions",
            BoundFilter::Bound => "Bound only",
            BoundFilter::Unbound => "Unbound only",
        };
        write!(f, "{}", label)
    }
}

/// Search service used by the filter
///
/// Implementations may rank or fuzz freely; the filter only asks whether a
/// record matches a non-empty, lower-cased query.
pub trait SearchIndex {
    fn matches(&self, record: &ActionRecord, query: &str) -> bool;
}

/// Case-insensitive substring search over name, label, description and tags
#[derive(Clone, Copy, Debug, Default)]
pub struct SubstringSearch;

impl SearchIndex for SubstringSearch {
    fn matches(&self, record: &ActionRecord, query: &str) -> bool {
        record.action_name().to_lowercase().contains(query)
            || record.display_name().to_lowercase().contains(query)
            || record.description().to_lowercase().contains(query)
            || record
                .keyword_tags()
                .iter()
                .any(|tag| tag.to_lowercase().contains(query))
    }
}

/// The full filter state of a listing
#[derive(Clone, Debug, Default)]
pub struct ActionFilter {
    pub bound: BoundFilter,
    pub tags: Vec<String>,
    pub query: String,
    pub conflicts_only: bool,
}

impl ActionFilter {
    /// Records of `list` that pass every filter for `device`, in list order
    ///
    /// With `conflicts_only` set, the result is grouped by bind instead:
    /// each group of 2 or more records sharing a bind, groups ordered by
    /// first appearance.
    pub fn apply<'a>(
        &self,
        list: &'a ActionList,
        device: DeviceClass,
        search: &dyn SearchIndex,
    ) -> Vec<&'a ActionRecord> {
        let query = self.query.trim().to_lowercase();
        let tags: Vec<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();

        let filtered: Vec<&ActionRecord> = list
            .iter()
            .filter(|r| r.is_visible_in(device))
            .filter(|r| self.bound.accepts(r, device))
            .filter(|r| {
                tags.is_empty()
                    || r.keyword_tags()
                        .iter()
                        .any(|k| tags.contains(&k.to_lowercase()))
            })
            .filter(|r| query.is_empty() || search.matches(r, &query))
            .collect();

        if !self.conflicts_only {
            return filtered;
        }

        let mut groups: IndexMap<&str, Vec<&ActionRecord>> = IndexMap::new();
        for record in filtered {
            let bind = record.bind(device).trim();
            if !bind.is_empty() {
                groups.entry(bind).or_default().push(record);
            }
        }

        groups
            .into_values()
            .filter(|group| group.len() > 1)
            .flatten()
            .collect()
    }
}
