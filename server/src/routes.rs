//! HTTP handlers for the todo resource.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::extract::{TodoIdPath, ValidJson};
use crate::schemas::{Message, TodoCreate, TodoResponse, TodoUpdate};
use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "Todo backend is live";
pub const DELETED_MESSAGE: &str = "Todo deleted successfully";

pub async fn root() -> Json<Message> {
    Json(Message::new(ROOT_MESSAGE))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.store().list().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

pub async fn create_todo(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<TodoCreate>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let todo = state.store().create(input.into()).await?;
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo.into())))
}

pub async fn update_todo(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
    ValidJson(input): ValidJson<TodoUpdate>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.store().update(id, input.into()).await?;
    tracing::info!(id, "todo updated");
    Ok(Json(todo.into()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
) -> Result<Json<Message>, ApiError> {
    state.store().delete(id).await?;
    tracing::info!(id, "todo deleted");
    Ok(Json(Message::new(DELETED_MESSAGE)))
}
