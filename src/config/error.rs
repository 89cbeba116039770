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

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the state store and file transactions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// State file does not exist where one was required.
    #[error("State file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// State directory or backup directory cannot be created or written to.
    #[error("Directory not writable: {}", .0.display())]
    DirNotWritable(PathBuf),
    /// Failed to create or restore a backup file.
    #[error("Backup failed: {0}")]
    BackupFailed(String),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// State file is not valid JSON for the expected layout.
    #[error("State file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// State file was written by a newer layout than this build reads.
    #[error("Unsupported state version {found} (expected at most {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
