//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use taskpad_core::{ListParams, NewUser, Page, User, UserPatch};

use crate::db::repos::UserRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Update user request; absent fields are left unchanged
#[derive(Deserialize, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// GET /users - list users, newest first
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.pool).list(Page::from(params)).await?;
    Ok(Json(users))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(user))
}

/// POST /users
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let new = NewUser::new(&req.name, &req.email)?;
    let user = UserRepo::new(&state.pool).create(new).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id} - partial update
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let patch = UserPatch::new(req.name, req.email)?;
    let user = UserRepo::new(&state.pool).update(id, patch).await?;
    Ok(Json(user))
}

/// DELETE /users/{id} - 204 on success
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
