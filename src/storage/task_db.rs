// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! Embedded task database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `tasks`: task_id → serialized Task (JSON bytes)
//! - `owner_task_index`: composite key (owner_id|task_id) → task_id
//!
//! The owner index is what keeps `list` from scanning the whole collection:
//! a prefix range over `owner_id|` yields exactly that owner's task ids.
//! Every mutation touches both tables inside a single write transaction, so
//! the index can never disagree with the primary table.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::ownership::OwnershipCheck;
use crate::models::Task;

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: task_id → serialized Task (JSON bytes).
const TASKS: TableDefinition<&str, &[u8]> = TableDefinition::new("tasks");

/// Index: composite key (owner_id|task_id) → task_id.
const OWNER_INDEX: TableDefinition<&[u8], &str> = TableDefinition::new("owner_task_index");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: user {user_id} does not own task {task_id}")]
    Forbidden { user_id: String, task_id: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a composite key for the owner index.
///
/// Format: `owner_id | task_id`. Task ids are UUIDs and never contain `|`.
/// Owner ids are identity-provider subject claims with no charset guarantee,
/// so a `|` in one makes prefix ranges overlap across owners; the scan in
/// [`TaskDatabase::list_by_owner`] re-checks `owner_id` on every resolved row.
fn make_index_key(owner_id: &str, task_id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(owner_id.len() + 1 + task_id.len());
    key.extend_from_slice(owner_id.as_bytes());
    key.push(b'|');
    key.extend_from_slice(task_id.as_bytes());
    key
}

/// Build a prefix key for range scanning all tasks of an owner.
fn make_prefix(owner_id: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(owner_id.len() + 1);
    prefix.extend_from_slice(owner_id.as_bytes());
    prefix.push(b'|');
    prefix
}

/// Build the upper bound for a range scan (prefix with 0xFF bytes appended).
fn make_prefix_end(owner_id: &str) -> Vec<u8> {
    let mut end = Vec::with_capacity(owner_id.len() + 1 + 40);
    end.extend_from_slice(owner_id.as_bytes());
    end.push(b'|');
    end.extend_from_slice(&[0xFF; 40]);
    end
}

// =============================================================================
// TaskDatabase
// =============================================================================

/// Embedded ACID task store with a per-owner secondary index.
pub struct TaskDatabase {
    db: Database,
}

impl TaskDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TASKS)?;
            let _ = write_txn.open_table(OWNER_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Check that the database accepts read transactions.
    pub fn health_check(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(TASKS)?;
        Ok(())
    }

    /// Insert a new task owned by `owner_id`, assigning a fresh id.
    ///
    /// Used by both create (`completed = false`) and restore (`completed`
    /// taken from the delete snapshot). The row and its index entry are
    /// written in one transaction.
    pub fn create_task(
        &self,
        owner_id: &str,
        body: String,
        completed: bool,
    ) -> StorageResult<Task> {
        let task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            body,
            completed,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_vec(&task)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut tasks = write_txn.open_table(TASKS)?;
            tasks.insert(task.id.as_str(), json.as_slice())?;

            let mut index = write_txn.open_table(OWNER_INDEX)?;
            let key = make_index_key(&task.owner_id, &task.id);
            index.insert(key.as_slice(), task.id.as_str())?;
        }
        write_txn.commit()?;
        Ok(task)
    }

    /// Look up a single task by id.
    pub fn get(&self, task_id: &str) -> StorageResult<Option<Task>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TASKS)?;
        match table.get(task_id)? {
            Some(value) => {
                let task: Task = serde_json::from_slice(value.value())?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    /// The ownership-authorization gate.
    ///
    /// Loads the task and returns it only if `caller_id` owns it. Read-only;
    /// the caller performs the actual mutation after a successful check.
    ///
    /// # Errors
    /// `NotFound` if no task exists under `task_id`, `Forbidden` if it
    /// belongs to a different caller.
    pub fn authorize(&self, task_id: &str, caller_id: &str) -> StorageResult<Task> {
        self.get(task_id)?.verify_owner(caller_id, task_id)
    }

    /// Set the completion flag of an existing task.
    ///
    /// Callers must have run [`TaskDatabase::authorize`] first; this method
    /// patches unconditionally. Idempotent: writing the same value twice
    /// leaves the same state as writing it once.
    pub fn set_completed(&self, task_id: &str, completed: bool) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut tasks = write_txn.open_table(TASKS)?;
            let mut task: Task = match tasks.get(task_id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::NotFound(format!("Task {task_id}"))),
            };
            task.completed = completed;
            let json = serde_json::to_vec(&task)?;
            tasks.insert(task_id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove a task and its index entry.
    ///
    /// Takes the full task (from the gate) so the index key can be rebuilt
    /// without a second lookup.
    pub fn delete(&self, task: &Task) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut tasks = write_txn.open_table(TASKS)?;
            if tasks.remove(task.id.as_str())?.is_none() {
                return Err(StorageError::NotFound(format!("Task {}", task.id)));
            }

            let mut index = write_txn.open_table(OWNER_INDEX)?;
            let key = make_index_key(&task.owner_id, &task.id);
            index.remove(key.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// List all tasks owned by `owner_id`, in unspecified order.
    ///
    /// Scans the owner index by prefix and resolves each id against the
    /// primary table. Rows whose stored `owner_id` differs are skipped:
    /// the prefix range over-matches when an owner id contains the `|`
    /// separator (`"u1"` covers keys of owner `"u1|x"`).
    pub fn list_by_owner(&self, owner_id: &str) -> StorageResult<Vec<Task>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(OWNER_INDEX)?;
        let tasks_table = read_txn.open_table(TASKS)?;

        let prefix = make_prefix(owner_id);
        let prefix_end = make_prefix_end(owner_id);

        let mut tasks = Vec::new();
        for entry in index.range(prefix.as_slice()..prefix_end.as_slice())? {
            let entry = entry?;
            let task_id = entry.1.value();
            if let Some(value) = tasks_table.get(task_id)? {
                let task: Task = serde_json::from_slice(value.value())?;
                if task.owner_id == owner_id {
                    tasks.push(task);
                }
            }
        }

        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db() -> (TaskDatabase, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = TaskDatabase::open(&dir.path().join("tasks.redb")).expect("Failed to open db");
        (db, dir)
    }

    #[test]
    fn create_and_get_task() {
        let (db, _dir) = test_db();

        let task = db.create_task("u1", "buy milk".into(), false).unwrap();
        assert_eq!(task.owner_id, "u1");
        assert_eq!(task.body, "buy milk");
        assert!(!task.completed);

        let loaded = db.get(&task.id).unwrap().expect("task exists");
        assert_eq!(loaded, task);
    }

    #[test]
    fn created_tasks_get_distinct_ids() {
        let (db, _dir) = test_db();

        let first = db.create_task("u1", "a".into(), false).unwrap();
        let second = db.create_task("u1", "a".into(), false).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn authorize_passes_for_owner() {
        let (db, _dir) = test_db();

        let task = db.create_task("u1", "buy milk".into(), false).unwrap();
        let authorized = db.authorize(&task.id, "u1").unwrap();
        assert_eq!(authorized, task);
    }

    #[test]
    fn authorize_rejects_non_owner_with_forbidden() {
        let (db, _dir) = test_db();

        let task = db.create_task("u1", "buy milk".into(), false).unwrap();
        let result = db.authorize(&task.id, "u2");
        assert!(matches!(result, Err(StorageError::Forbidden { .. })));

        // Storage state is unchanged by the rejected check.
        let stored = db.get(&task.id).unwrap().unwrap();
        assert_eq!(stored, task);
    }

    #[test]
    fn authorize_missing_task_is_not_found() {
        let (db, _dir) = test_db();

        let result = db.authorize("no-such-id", "u1");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn list_returns_only_the_owners_tasks() {
        let (db, _dir) = test_db();

        for i in 1..=3 {
            db.create_task("u1", format!("task {i}"), false).unwrap();
        }
        db.create_task("u2", "someone else's".into(), false).unwrap();
        db.create_task("u3", "another stranger's".into(), false).unwrap();

        let u1_tasks = db.list_by_owner("u1").unwrap();
        assert_eq!(u1_tasks.len(), 3);
        assert!(u1_tasks.iter().all(|t| t.owner_id == "u1"));

        let u2_tasks = db.list_by_owner("u2").unwrap();
        assert_eq!(u2_tasks.len(), 1);

        assert!(db.list_by_owner("nobody").unwrap().is_empty());
    }

    #[test]
    fn list_is_not_fooled_by_separator_in_owner_id() {
        let (db, _dir) = test_db();

        // "u1|evil" index keys fall inside the prefix range for "u1".
        db.create_task("u1|evil", "not yours".into(), false).unwrap();
        db.create_task("u1", "mine".into(), false).unwrap();

        let u1_tasks = db.list_by_owner("u1").unwrap();
        assert_eq!(u1_tasks.len(), 1);
        assert!(u1_tasks.iter().all(|t| t.owner_id == "u1"));

        let evil_tasks = db.list_by_owner("u1|evil").unwrap();
        assert_eq!(evil_tasks.len(), 1);
        assert_eq!(evil_tasks[0].body, "not yours");
    }

    #[test]
    fn set_completed_is_idempotent() {
        let (db, _dir) = test_db();

        let task = db.create_task("u1", "buy milk".into(), false).unwrap();

        db.set_completed(&task.id, true).unwrap();
        let once = db.get(&task.id).unwrap().unwrap();
        db.set_completed(&task.id, true).unwrap();
        let twice = db.get(&task.id).unwrap().unwrap();

        assert!(once.completed);
        assert_eq!(once, twice);
    }

    #[test]
    fn set_completed_missing_task_errors() {
        let (db, _dir) = test_db();

        let result = db.set_completed("no-such-id", true);
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn delete_removes_row_and_index_entry() {
        let (db, _dir) = test_db();

        let task = db.create_task("u1", "buy milk".into(), false).unwrap();
        db.delete(&task).unwrap();

        assert!(db.get(&task.id).unwrap().is_none());
        assert!(db.list_by_owner("u1").unwrap().is_empty());
    }

    #[test]
    fn delete_then_restore_round_trips_body_and_completed() {
        let (db, _dir) = test_db();

        let task = db.create_task("u1", "buy milk".into(), false).unwrap();
        db.set_completed(&task.id, true).unwrap();
        let task = db.get(&task.id).unwrap().unwrap();

        let snapshot = task.snapshot();
        db.delete(&task).unwrap();

        // Restore is a compensating create scoped to the acting caller.
        let restored = db
            .create_task("u1", snapshot.body.clone(), snapshot.completed)
            .unwrap();

        assert_ne!(restored.id, task.id);
        assert_eq!(restored.body, task.body);
        assert_eq!(restored.completed, task.completed);

        let listed = db.list_by_owner("u1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].body, "buy milk");
    }

    #[test]
    fn restore_stamps_the_acting_caller_as_owner() {
        let (db, _dir) = test_db();

        let task = db.create_task("u1", "shared note".into(), false).unwrap();
        let snapshot = task.snapshot();
        db.delete(&task).unwrap();

        // A different caller restoring the snapshot owns the new copy.
        let restored = db
            .create_task("u2", snapshot.body, snapshot.completed)
            .unwrap();
        assert_eq!(restored.owner_id, "u2");
        assert!(db.list_by_owner("u1").unwrap().is_empty());
        assert_eq!(db.list_by_owner("u2").unwrap().len(), 1);
    }

    #[test]
    fn reopen_preserves_tasks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.redb");

        let task = {
            let db = TaskDatabase::open(&path).unwrap();
            db.create_task("u1", "persisted".into(), false).unwrap()
        };

        let db = TaskDatabase::open(&path).unwrap();
        let loaded = db.get(&task.id).unwrap().unwrap();
        assert_eq!(loaded, task);
        assert_eq!(db.list_by_owner("u1").unwrap().len(), 1);
    }

    #[test]
    fn health_check_passes_on_open_db() {
        let (db, _dir) = test_db();
        assert!(db.health_check().is_ok());
    }
}
