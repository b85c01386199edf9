//! User handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use common::{AppError, AppResult, Payload};
use domain::{User, UserId, UserInput};

use crate::state::AppState;

const MSG_INVALID_USER_ID: &str = "invalid user id";

/// Unwrap and parse the `:id` segment.
fn user_id(path: Result<Path<String>, PathRejection>) -> AppResult<UserId> {
    let Path(raw) = path.map_err(|e| {
        tracing::debug!("Rejected path: {}", e.body_text());
        AppError::validation(MSG_INVALID_USER_ID)
    })?;
    parse_user_id(&raw)
}

/// Only positive integers name a user.
fn parse_user_id(raw: &str) -> AppResult<UserId> {
    raw.parse::<UserId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::validation(MSG_INVALID_USER_ID))
}

/// Id of a newly created user
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUser {
    #[schema(example = 1)]
    pub id: UserId,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "user updated successfully")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "user deleted successfully")]
    pub message: String,
    #[schema(example = 1)]
    pub rows_affected: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Users ordered by id", body = Vec<User>),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("api_key" = [])),
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = CreatedUser),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Payload(input): Payload<UserInput>,
) -> AppResult<(StatusCode, Json<CreatedUser>)> {
    let id = state.user_service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedUser { id })))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("api_key" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<User>> {
    let id = user_id(path)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace a user's name, email and age
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("api_key" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid id or validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Payload<UserInput>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    let id = user_id(path)?;
    let Payload(input) = payload?;

    state.user_service.update_user(id, input).await?;

    Ok(Json(MessageResponse {
        message: "user updated successfully".to_string(),
    }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("api_key" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<DeletedResponse>> {
    let id = user_id(path)?;
    let rows_affected = state.user_service.delete_user(id).await?;

    Ok(Json(DeletedResponse {
        message: "user deleted successfully".to_string(),
        rows_affected,
    }))
}

/// Storage reachability check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Storage reachable", body = HealthResponse),
        (status = 503, description = "Storage unreachable")
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.user_service.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                }),
            )
        }
    }
}
