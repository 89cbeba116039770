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

//! Durable bind state with atomic writes and backup support.
//!
//! Every edit to a bind slot ends in a save of the whole state blob. Key
//! features:
//!
//! - **Atomic writes**: temp-file-then-rename, the blob is never half written
//! - **Automatic backups**: every save keeps a timestamped copy of the
//!   previous blob in `backups/` next to it
//! - **Pruning**: only the newest `MAX_BACKUPS` copies are kept
//! - **Sparse layout**: only slots that differ from the base configuration
//!   are stored (see `state`)
//!
//! # Example
//!
//! ```no_run
//! use star_binder::config::StateStore;
//! use star_binder::core::ActionList;
//!
//! let store = StateStore::new("/home/user/.config/star-binder/bindings.json".into())?;
//! let mut actions = ActionList::new();
//!
//! if let Some(state) = store.load()? {
//!     state.replay(&mut actions);
//! }
//! store.persist(&actions)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod state;
pub mod transaction;

pub use error::ConfigError;
pub use state::{PersistedState, ReplayReport, STATE_VERSION};
pub use transaction::{write_atomic, StateTransaction};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::core::ActionList;

/// Backups kept after each save
pub const MAX_BACKUPS: usize = 5;

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S%.3f";

/// Owns the state blob path and its backup directory.
#[derive(Debug)]
pub struct StateStore {
    state_path: PathBuf,
    backup_dir: PathBuf,
}

impl StateStore {
    /// Creates a store for the given state file.
    ///
    /// The file itself may not exist yet (first run). Its directory and a
    /// `backups/` directory beside it are created when missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DirNotWritable` if either directory cannot be
    /// created or is read-only.
    pub fn new(state_path: PathBuf) -> Result<Self, ConfigError> {
        let parent = match state_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if state_path.read_link().is_ok() {
            log::warn!("State file is a symlink: {}", state_path.display());
        }

        // e.g. ~/.config/star-binder/bindings.json → ~/.config/star-binder/backups/
        let backup_dir = parent.join("backups");

        for dir in [&parent, &backup_dir] {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|_| ConfigError::DirNotWritable(dir.clone()))?;
            }
            if dir.metadata()?.permissions().readonly() {
                return Err(ConfigError::DirNotWritable(dir.clone()));
            }
        }

        Ok(Self {
            state_path,
            backup_dir,
        })
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Reads the stored state, `None` on first run
    pub fn load(&self) -> Result<Option<PersistedState>, ConfigError> {
        if !self.state_path.exists() {
            log::debug!("No state file at {}", self.state_path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&self.state_path)?;
        PersistedState::from_json(&content).map(Some)
    }

    /// Saves a state blob transactionally and prunes old backups
    ///
    /// A failed write is rolled back to the previous blob.
    pub fn save(&self, state: &PersistedState) -> Result<(), ConfigError> {
        let content = state.to_json()?;
        let tx = StateTransaction::begin(self)?;

        if let Err(e) = tx.commit(&content) {
            log::error!("Saving {} failed: {}", self.state_path.display(), e);
            if let Err(rollback_err) = tx.rollback() {
                log::error!(
                    "Rolling back {} failed: {}",
                    self.state_path.display(),
                    rollback_err
                );
            }
            return Err(e);
        }

        let removed = self.cleanup_old_backups(MAX_BACKUPS)?;
        if removed > 0 {
            log::debug!("Pruned {} old state backups", removed);
        }
        Ok(())
    }

    /// Captures and saves every edited slot of `list`
    pub fn persist(&self, list: &ActionList) -> Result<(), ConfigError> {
        self.save(&PersistedState::capture(list))
    }

    fn backup_prefix(&self) -> String {
        let name = self
            .state_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state".to_string());
        format!("{}.", name)
    }

    /// Copies the current state file into the backup directory
    ///
    /// Returns `None` when there is no state file yet.
    pub(crate) fn create_timestamped_backup(&self) -> Result<Option<PathBuf>, ConfigError> {
        if !self.state_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.state_path)?;
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup_path = self
            .backup_dir
            .join(format!("{}{}", self.backup_prefix(), timestamp));

        fs::write(&backup_path, &content).map_err(|e| {
            ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e))
        })?;

        Ok(Some(backup_path))
    }

    /// Backups of this state file, newest first
    pub fn list_backups(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let prefix = self.backup_prefix();
        let mut backups: Vec<PathBuf> = fs::read_dir(&self.backup_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .is_some_and(|n| n.to_string_lossy().starts_with(&prefix))
            })
            .collect();

        // Timestamps are fixed-width, so name order is age order
        backups.sort();
        backups.reverse();
        Ok(backups)
    }

    /// Deletes all but the newest `keep` backups, returning how many went
    pub fn cleanup_old_backups(&self, keep: usize) -> Result<usize, ConfigError> {
        let backups = self.list_backups()?;
        let mut removed = 0;

        for old in backups.iter().skip(keep) {
            fs::remove_file(old)?;
            removed += 1;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests;
