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

//! State file transactions with automatic backups
//!
//! Provides atomic write operations for the state blob and for exported
//! profiles.

use atomic_write_file::AtomicWriteFile;
use std::{fs, io::Write, path::Path, path::PathBuf};

use crate::config::{ConfigError, StateStore};

/// Writes `content` to `path` via temp file and rename
///
/// Readers never observe a partially written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options().open(path).map_err(|e| {
        ConfigError::WriteFailed(format!("Failed to open {} for atomic write: {}", path.display(), e))
    })?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))
}

/// Atomic state transaction with automatic backup.
///
/// # Lifecycle
///
/// 1. `begin()` - Backs up the current state file, if there is one
/// 2. Caller serializes the new state (in memory)
/// 3. `commit()` - Writes atomically, or `rollback()` - Restores the backup
///
/// # Example
///
/// ```no_run
/// use star_binder::config::{StateStore, StateTransaction};
/// use std::path::PathBuf;
///
/// let store = StateStore::new(PathBuf::from("bindings.json"))?;
/// let tx = StateTransaction::begin(&store)?;
/// tx.commit("{\"version\":1,\"actions\":{}}\n")?;
/// # Ok::<(), star_binder::config::ConfigError>(())
/// ```
pub struct StateTransaction<'a> {
    store: &'a StateStore,
    backup_path: Option<PathBuf>,
}

impl<'a> StateTransaction<'a> {
    /// Begins a transaction by backing up the current state file.
    ///
    /// The first save has nothing to back up; rolling such a transaction
    /// back removes the state file again.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be read or the backup
    /// cannot be written. Nothing has been modified in that case.
    pub fn begin(store: &'a StateStore) -> Result<Self, ConfigError> {
        let backup_path = store.create_timestamped_backup()?;

        Ok(Self { store, backup_path })
    }

    /// Backup taken by `begin()`, if the state file existed
    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    /// Commits the transaction by atomically replacing the state file.
    ///
    /// Borrows, so a failed commit can still be rolled back. The backup
    /// stays in the backup directory; pruning is left to
    /// `StateStore::cleanup_old_backups`.
    pub fn commit(&self, new_content: &str) -> Result<(), ConfigError> {
        write_atomic(self.store.state_path(), new_content)
    }

    /// Restores the state file to how it was when `begin()` ran.
    ///
    /// Borrows immutably, so a failed rollback can be retried.
    pub fn rollback(&self) -> Result<(), ConfigError> {
        match &self.backup_path {
            Some(backup_path) => {
                let backup_content = fs::read_to_string(backup_path).map_err(|e| {
                    ConfigError::BackupFailed(format!(
                        "Failed to read backup {}: {}",
                        backup_path.display(),
                        e
                    ))
                })?;
                write_atomic(self.store.state_path(), &backup_content)
            }
            None => {
                let path = self.store.state_path();
                if path.exists() {
                    fs::remove_file(path)?;
                }
                Ok(())
            }
        }
    }
}
