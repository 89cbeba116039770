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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the data model and the pure algorithms around it:
//! - Action records, bind slots and the master list
//! - Raw code translation and display labels
//! - Captured combination validation
//! - Bind string and manual entry parsing
//! - Conflict detection and list filtering
//! - Keyword dictionary and category taxonomy
//!
//! Nothing here performs I/O apart from reading the keyword dictionary, so
//! everything can be unit tested without files or input devices.

pub mod action_list;
pub mod conflict;
pub mod filter;
pub mod keywords;
pub mod parser;
pub mod translator;
pub mod types;
pub mod validator;

pub use action_list::ActionList;
pub use conflict::{has_conflict, Conflict, ConflictDetector};
pub use filter::{ActionFilter, BoundFilter, SearchIndex, SubstringSearch};
pub use keywords::{KeywordDictionary, KeywordEntry};
pub use parser::{BindStringError, ManualEntry, ParsedBind};
pub use types::*;
pub use validator::{validate_combination, ValidationError};

#[cfg(test)]
mod tests;
