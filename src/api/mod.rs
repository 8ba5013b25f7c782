// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateTaskRequest, DeleteTaskResponse, RestoreTaskRequest, Task, TaskListResponse,
        TaskSnapshot, UpdateTaskRequest,
    },
    state::AppState,
};

pub mod health;
pub mod tasks;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/restore", post(tasks::restore_task))
        .route(
            "/tasks/{task_id}",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        tasks::list_tasks,
        tasks::create_task,
        tasks::update_task,
        tasks::delete_task,
        tasks::restore_task,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Task,
            TaskSnapshot,
            CreateTaskRequest,
            UpdateTaskRequest,
            RestoreTaskRequest,
            TaskListResponse,
            DeleteTaskResponse
        )
    ),
    tags(
        (name = "Tasks", description = "Per-user task management"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;
