// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! # API Data Models
//!
//! Request and response data structures for the REST API. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON handling
//! and OpenAPI documentation.
//!
//! The task is the sole persisted entity. Its `owner_id` is stamped from the
//! authenticated caller at creation time and is never accepted from request
//! bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single task record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier (UUIDv4), assigned by the server.
    pub id: String,
    /// User ID of the caller that created this task. Immutable.
    pub owner_id: String,
    /// Free-form task text, set at creation.
    pub body: String,
    /// Completion flag, toggled by the owner.
    pub completed: bool,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

/// Request to create a new task.
///
/// The owner and the initial `completed = false` are filled in server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Task text.
    pub body: String,
}

/// Request to update a task's completion flag.
///
/// The body is intentionally absent: update only toggles completion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    /// New completion value.
    pub completed: bool,
}

/// The client-held remnant of a deleted task, sufficient to offer undo.
///
/// The original id is discarded; restore assigns a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Task text of the deleted task.
    pub body: String,
    /// Completion flag of the deleted task.
    pub completed: bool,
}

/// Request to re-create a deleted task from its snapshot.
///
/// The restored copy is owned by the caller issuing the restore, which is
/// how the dashboard implements undo as a compensating create.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestoreTaskRequest {
    /// Task text captured at deletion.
    pub body: String,
    /// Completion flag captured at deletion.
    pub completed: bool,
}

/// Response containing the caller's tasks.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskListResponse {
    /// Tasks owned by the caller, in unspecified order.
    pub tasks: Vec<Task>,
    /// Total count of tasks.
    pub total: usize,
}

/// Response after deleting a task.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteTaskResponse {
    /// Message indicating success.
    pub message: String,
    /// Snapshot the UI can hold to offer undo via restore.
    pub snapshot: TaskSnapshot,
}

impl Task {
    /// Capture the undo snapshot for this task.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            body: self.body.clone(),
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_drops_id_and_owner() {
        let task = Task {
            id: "t-1".into(),
            owner_id: "user_1".into(),
            body: "buy milk".into(),
            completed: true,
            created_at: Utc::now(),
        };

        let snapshot = task.snapshot();
        assert_eq!(snapshot.body, "buy milk");
        assert!(snapshot.completed);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("owner_id").is_none());
    }

    #[test]
    fn task_serializes_all_fields() {
        let task = Task {
            id: "t-1".into(),
            owner_id: "user_1".into(),
            body: "water plants".into(),
            completed: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "t-1");
        assert_eq!(json["owner_id"], "user_1");
        assert_eq!(json["body"], "water plants");
        assert_eq!(json["completed"], false);
    }
}
