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

//! src/xml/mod.rs
//!
//! Game XML dialects
//!
//! - `base`: the shipped action-map document every session starts from
//! - `export`: the sparse profile written for the game to load
//! - `import`: reading such a profile back onto the loaded records
//!
//! Reading uses `roxmltree`, writing uses the `quick-xml` event writer.

pub mod base;
pub mod export;
pub mod import;

pub use base::{load_base_config, parse_base_config, EXCLUDED_ACTION_MAPS};
pub use export::{export_profile, DEFAULT_PROFILE_NAME};
pub use import::{apply_import, parse_import, read_import, ImportReport, ImportedAction, ImportedRebind};

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading the base configuration or keyword dictionary
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Base configuration is not valid XML: {0}")]
    Xml(String),

    #[error("Keyword dictionary is not valid JSON: {0}")]
    Dictionary(String),
}

/// Failures writing a profile
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write profile XML: {0}")]
    Write(String),

    #[error("Profile XML is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Failures reading a profile
///
/// Any of these aborts the whole import before a record is touched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Profile is not valid XML: {0}")]
    Xml(String),
}

#[cfg(test)]
pub(crate) mod tests;
