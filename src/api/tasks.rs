// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! Task management API endpoints.
//!
//! All operations require authentication. Reads are scoped to the resolved
//! caller; update and delete run the ownership gate first and propagate its
//! `NotFound`/`Forbidden` failures unmodified. Restore is the compensating
//! create the dashboard uses for undo-after-delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        CreateTaskRequest, DeleteTaskResponse, RestoreTaskRequest, Task, TaskListResponse,
        UpdateTaskRequest,
    },
    state::AppState,
    storage::StorageError,
};

/// List all tasks owned by the authenticated caller.
#[utoipa::path(
    get,
    path = "/v1/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tasks owned by the caller", body = TaskListResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_tasks(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let tasks = state.db.list_by_owner(&user.user_id)?;
    let total = tasks.len();

    Ok(Json(TaskListResponse { tasks, total }))
}

/// Create a new task owned by the authenticated caller.
///
/// The task starts uncompleted and gets a fresh server-assigned id.
#[utoipa::path(
    post,
    path = "/v1/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_task(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.db.create_task(&user.user_id, request.body, false)?;

    tracing::debug!(task_id = %task.id, user_id = %user.user_id, "task created");
    state.feed.notify(&user.user_id);

    Ok((StatusCode::CREATED, Json(task)))
}

/// Set the completion flag of a task.
///
/// Runs the ownership gate first; only the owner may toggle completion.
#[utoipa::path(
    put,
    path = "/v1/tasks/{task_id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(
        ("task_id" = String, Path, description = "Task ID to update")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 204, description = "Task updated"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your task"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<StatusCode, ApiError> {
    let task = gate(&state, &task_id, &user.user_id)?;
    state.db.set_completed(&task.id, request.completed)?;

    state.feed.notify(&user.user_id);

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a task.
///
/// Runs the ownership gate first. The response carries a `{body, completed}`
/// snapshot so the UI can offer undo via restore; the id is gone for good.
#[utoipa::path(
    delete,
    path = "/v1/tasks/{task_id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(
        ("task_id" = String, Path, description = "Task ID to delete")
    ),
    responses(
        (status = 200, description = "Task deleted", body = DeleteTaskResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your task"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let task = gate(&state, &task_id, &user.user_id)?;
    let snapshot = task.snapshot();
    state.db.delete(&task)?;

    tracing::debug!(task_id = %task_id, user_id = %user.user_id, "task deleted");
    state.feed.notify(&user.user_id);

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
        snapshot,
    }))
}

/// Re-create a deleted task from its snapshot.
///
/// Undo is a compensating create, not a transactional rollback: the restored
/// task gets a fresh id and is owned by the caller issuing the restore.
#[utoipa::path(
    post,
    path = "/v1/tasks/restore",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    request_body = RestoreTaskRequest,
    responses(
        (status = 201, description = "Task restored", body = Task),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn restore_task(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<RestoreTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state
        .db
        .create_task(&user.user_id, request.body, request.completed)?;

    tracing::debug!(task_id = %task.id, user_id = %user.user_id, "task restored");
    state.feed.notify(&user.user_id);

    Ok((StatusCode::CREATED, Json(task)))
}

/// Run the ownership gate and log rejections.
///
/// `Forbidden` and `NotFound` render the same way to the user; the log line
/// is where the two stay distinguishable.
fn gate(state: &AppState, task_id: &str, caller_id: &str) -> Result<Task, ApiError> {
    state.db.authorize(task_id, caller_id).map_err(|e| {
        if let StorageError::Forbidden { user_id, task_id } = &e {
            tracing::warn!(
                user_id = %user_id,
                task_id = %task_id,
                "ownership gate rejected mutation"
            );
        }
        e.into()
    })
}
