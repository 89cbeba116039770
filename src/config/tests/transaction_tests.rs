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

use super::super::*;
use std::{fs, thread, time::Duration};
use tempfile::TempDir;

fn store_with_content(content: Option<&str>) -> (TempDir, StateStore) {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("bindings.json");
    if let Some(content) = content {
        fs::write(&state_path, content).unwrap();
    }
    let store = StateStore::new(state_path).unwrap();
    (temp_dir, store)
}

// ============================================================================
// StateTransaction Tests
// ============================================================================

#[test]
fn test_transaction_basic_flow() {
    let original = "{\"version\":1,\"actions\":{}}\n";
    let (_temp_dir, store) = store_with_content(Some(original));

    let tx = StateTransaction::begin(&store).unwrap();
    assert_eq!(store.list_backups().unwrap().len(), 1, "begin should back up");

    let updated = "{\"version\":1,\"actions\":{\"v_boost\":{}}}\n";
    tx.commit(updated).unwrap();

    assert_eq!(fs::read_to_string(store.state_path()).unwrap(), updated);

    let backups = store.list_backups().unwrap();
    assert_eq!(backups.len(), 1, "Backup should survive the commit");
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), original);
}

#[test]
fn test_rollback_restores_previous_content() {
    let (_temp_dir, store) = store_with_content(Some("first\n"));

    let tx = StateTransaction::begin(&store).unwrap();
    write_atomic(store.state_path(), "half-finished edit\n").unwrap();
    tx.rollback().unwrap();

    assert_eq!(fs::read_to_string(store.state_path()).unwrap(), "first\n");
}

#[test]
fn test_first_save_has_no_backup() {
    let (_temp_dir, store) = store_with_content(None);

    let tx = StateTransaction::begin(&store).unwrap();
    assert!(tx.backup_path().is_none());
    assert!(store.list_backups().unwrap().is_empty());

    tx.commit("{}\n").unwrap();
    assert!(store.state_path().exists());
}

#[test]
fn test_rollback_of_first_save_removes_file() {
    let (_temp_dir, store) = store_with_content(None);

    let tx = StateTransaction::begin(&store).unwrap();
    fs::write(store.state_path(), "partial").unwrap();
    tx.rollback().unwrap();

    assert!(!store.state_path().exists());
}

#[test]
fn test_backup_filename_carries_timestamp() {
    let (_temp_dir, store) = store_with_content(Some("content\n"));

    let tx = StateTransaction::begin(&store).unwrap();
    let backup = tx.backup_path().unwrap().to_path_buf();
    assert_eq!(backup.parent().unwrap(), store.backup_dir());

    let name = backup.file_name().unwrap().to_str().unwrap();
    let timestamp = name.strip_prefix("bindings.json.").unwrap();
    let parsed = chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d_%H%M%S%.3f");
    assert!(parsed.is_ok(), "Timestamp should parse: {}", timestamp);
}

#[test]
fn test_multiple_transactions_create_multiple_backups() {
    let (_temp_dir, store) = store_with_content(Some("version 1\n"));

    for next in ["version 2\n", "version 3\n", "version 4\n"] {
        StateTransaction::begin(&store).unwrap().commit(next).unwrap();
        thread::sleep(Duration::from_millis(20));
    }

    let backups = store.list_backups().unwrap();
    assert_eq!(backups.len(), 3);
    // Newest first
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "version 3\n");
    assert_eq!(fs::read_to_string(&backups[2]).unwrap(), "version 1\n");
}

#[test]
fn test_write_atomic_preserves_exact_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("profile.xml");

    for content in ["", "line1\n\n\nline2\n", "no newline at end", "<a b=\"&amp;\"/>\n"] {
        write_atomic(&path, content).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}
