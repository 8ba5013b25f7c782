// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! Ownership enforcement for task access.
//!
//! Every mutation targeting an existing task must pass through these checks
//! before the storage layer performs the write. The gate is read-only: it
//! loads nothing itself and mutates nothing, it only decides.

use crate::models::Task;

use super::{StorageError, StorageResult};

/// Trait for records that carry an owner.
pub trait OwnedResource {
    /// User ID of the record's owner.
    fn owner_id(&self) -> &str;
}

impl OwnedResource for Task {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// Ownership check on a possibly-missing record.
///
/// `None` becomes `NotFound`, an owner mismatch becomes `Forbidden`, and
/// only the owner's own record passes through. This is the single
/// authorization path for update and delete; create and list never call it.
pub trait OwnershipCheck<T> {
    /// Verify ownership and return the record if authorized.
    ///
    /// # Errors
    /// `StorageError::NotFound` if the record does not exist,
    /// `StorageError::Forbidden` if it belongs to a different caller.
    fn verify_owner(self, caller_id: &str, record_id: &str) -> StorageResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn verify_owner(self, caller_id: &str, record_id: &str) -> StorageResult<T> {
        match self {
            Some(record) if record.owner_id() == caller_id => Ok(record),
            Some(_) => Err(StorageError::Forbidden {
                user_id: caller_id.to_string(),
                task_id: record_id.to_string(),
            }),
            None => Err(StorageError::NotFound(format!("Task {record_id}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_task(id: &str, owner: &str) -> Task {
        Task {
            id: id.to_string(),
            owner_id: owner.to_string(),
            body: "buy milk".to_string(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_passes_the_gate() {
        let task = Some(make_task("t-1", "user_123"));
        let result = task.verify_owner("user_123", "t-1");
        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, "t-1");
    }

    #[test]
    fn non_owner_is_forbidden() {
        let task = Some(make_task("t-1", "user_123"));
        let result = task.verify_owner("user_456", "t-1");
        assert!(matches!(result, Err(StorageError::Forbidden { .. })));
    }

    #[test]
    fn missing_record_is_not_found() {
        let task: Option<Task> = None;
        let result = task.verify_owner("user_123", "t-missing");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn forbidden_names_the_caller_not_the_owner() {
        let task = Some(make_task("t-1", "user_123"));
        let err = task.verify_owner("user_456", "t-1").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("user_456"));
        assert!(!message.contains("user_123"));
    }
}
