//! Todo endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use taskpad_core::{NewTodo, Page, Todo, TodoPatch};

use crate::db::repos::{TodoFilter, TodoRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Create todo request
#[derive(Deserialize)]
pub struct CreateTodoRequest {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
}

/// Update todo request; absent fields are left unchanged
#[derive(Deserialize, Default)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Query parameters for GET /todos
#[derive(Deserialize, Default)]
pub struct TodoListParams {
    pub user_id: Option<i64>,
    pub completed: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for GET /todos/user/{userId}
#[derive(Deserialize, Default)]
pub struct CompletionParam {
    pub completed: Option<bool>,
}

/// GET /todos - list todos, newest first, with optional equality filters
async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TodoListParams>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let filter = TodoFilter {
        user_id: params.user_id,
        completed: params.completed,
    };
    let page = Page::new(params.limit.unwrap_or(100), params.offset.unwrap_or(0));
    let todos = TodoRepo::new(&state.pool).list(filter, page).await?;
    Ok(Json(todos))
}

/// GET /todos/{id}
async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    let todo = TodoRepo::new(&state.pool).get(id).await?;
    Ok(Json(todo))
}

/// GET /todos/user/{userId} - all todos for a user, unpaginated.
///
/// An unknown user yields an empty array, not 404.
async fn list_user_todos(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(params): Query<CompletionParam>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = TodoRepo::new(&state.pool)
        .list_by_user(user_id, params.completed)
        .await?;
    Ok(Json(todos))
}

/// POST /todos
async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let new = NewTodo::new(req.user_id, &req.title, req.description)?;
    let todo = TodoRepo::new(&state.pool).create(new).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/{id} - partial update
async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let patch = TodoPatch::new(req.title, req.description, req.completed)?;
    let todo = TodoRepo::new(&state.pool).update(id, patch).await?;
    Ok(Json(todo))
}

/// DELETE /todos/{id} - 204 on success
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    TodoRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/user/{user_id}", get(list_user_todos))
}
