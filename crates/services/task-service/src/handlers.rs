//! Task handlers.
//!
//! A single `/tasks` resource: the optional `id` query parameter selects
//! one task for reads and is required for updates.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use common::{AppError, AppResult, Payload, ValidatedJson};
use domain::{Task, TaskId, MSG_DONE_NOT_BOOLEAN, MSG_INVALID_TITLE};

use crate::state::AppState;

const MSG_INVALID_ID: &str = "invalid id";

/// `?id=` query string, kept raw so bad values map to our own 400 body.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Parse the id if present; non-numeric or non-positive ids are rejected.
    fn parse(&self) -> AppResult<Option<TaskId>> {
        match self.id.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => parse_task_id(raw).map(Some),
        }
    }

    fn require(&self) -> AppResult<TaskId> {
        self.parse()?.ok_or_else(|| AppError::validation(MSG_INVALID_ID))
    }
}

/// Unwrap the query string; a malformed one reads as a bad id.
fn id_query(query: Result<Query<IdQuery>, QueryRejection>) -> AppResult<IdQuery> {
    query.map(|Query(q)| q).map_err(|e| {
        tracing::debug!("Rejected query string: {}", e.body_text());
        AppError::validation(MSG_INVALID_ID)
    })
}

fn parse_task_id(raw: &str) -> AppResult<TaskId> {
    raw.parse::<TaskId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::validation(MSG_INVALID_ID))
}

/// Task creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: String,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("blank_title").with_message(MSG_INVALID_TITLE.into()));
    }
    Ok(())
}

/// Done-flag update request; `done` must be present and non-null.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub done: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub updated: bool,
}

/// `GET /tasks` lists everything; `GET /tasks?id=n` returns one task.
pub async fn get_tasks(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> AppResult<Response> {
    match id_query(query)?.parse()? {
        None => Ok(Json(state.tasks.list()).into_response()),
        Some(id) => Ok(Json(state.tasks.get(id)?).into_response()),
    }
}

/// `POST /tasks` creates a task with a trimmed title.
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> (StatusCode, Json<Task>) {
    let task = state.tasks.create(payload.title.trim());
    (StatusCode::CREATED, Json(task))
}

/// `PATCH /tasks?id=n` sets the done flag.
pub async fn update_task(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Payload<UpdateTaskRequest>, AppError>,
) -> AppResult<Json<UpdatedResponse>> {
    // The id is checked before the body.
    let id = id_query(query)?.require()?;
    let done = payload
        .ok()
        .and_then(|Payload(body)| body.done)
        .ok_or_else(|| AppError::validation(MSG_DONE_NOT_BOOLEAN))?;

    state.tasks.update_done(id, done)?;

    Ok(Json(UpdatedResponse { updated: true }))
}
