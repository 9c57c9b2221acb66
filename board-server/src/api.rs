//! HTTP API
//!
//! JSON endpoints over the task repository. Every error body is
//! `{"error": "<message>"}` so clients can surface the reason as-is.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::domain::{DomainError, NewTask, Task, TaskPatch};
use crate::repository::{BoardRepository, Repository, TaskRepository};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub tasks: TaskRepository,
}

pub type SharedState = Arc<AppState>;

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::InvalidInput(msg) => ApiError::BadRequest(msg),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!("request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Task ids are UUIDs; anything else cannot name a task
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("Task {} not found", raw)))
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/boards/{board_id}/tasks",
            get(list_board_tasks).post(create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn list_board_tasks(
    State(state): State<SharedState>,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.tasks.list_by_board(&board_id).await?;
    tracing::debug!(board = %board_id, count = tasks.len(), "listed tasks");
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<SharedState>,
    Path(board_id): Path<String>,
    Json(req): Json<NewTask>,
) -> Result<impl IntoResponse, ApiError> {
    let task = Task::create(&board_id, req)?;
    let task = state.tasks.create(&task).await?;
    tracing::info!(board = %board_id, task = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let task = state
        .tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let new_status = req.status.clone();
    let task = state.tasks.apply_patch(id, req).await?;
    if let Some(status) = new_status {
        tracing::info!(task = %id, status = %status, "status changed");
    }
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_task_id(&id)?;
    state.tasks.delete(id).await?;
    tracing::info!(task = %id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ── Tests ─────────────────────────────────────────────────────────────
