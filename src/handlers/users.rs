//! # User Handlers

use axum::{
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::user;
use crate::repositories::UserRepository;
use crate::server::AppState;

/// Request payload for creating a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequestDto {
    /// Login name (required, max 150 characters, unique)
    #[schema(example = "ahtan")]
    pub username: String,
}

/// User as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    /// Creation timestamp (RFC 3339)
    #[schema(example = "2024-01-15T10:30:00+00:00")]
    pub created_at: String,
}

impl From<user::Model> for UserDto {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserDto>)
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = UserRepository::new(&state.db).list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequestDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Username already taken", body = ApiError)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let Json(request) = payload?;
    let user = UserRepository::new(&state.db)
        .create_user(&request.username)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found", body = ApiError)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let Path(id) = path?;
    let user = UserRepository::new(&state.db).get_user(id).await?;
    Ok(Json(user.into()))
}

/// Delete a user that owns no employee records
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ApiError),
        (status = 409, description = "User still owns employee records", body = ApiError)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    UserRepository::new(&state.db).delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
