//! Todo endpoints
//!
//! | Method | Path          | Success          |
//! |--------|---------------|------------------|
//! | POST   | /todos        | 201 + Todo       |
//! | GET    | /todos        | 200 + [Todo]     |
//! | GET    | /todos/{id}   | 200 + Todo       |
//! | PUT    | /todos/{id}   | 200 + Todo       |
//! | DELETE | /todos/{id}   | 204              |
//!
//! The collection also answers at `/todos/`.
//!
//! Failures are mapped by [`ApiError`]: 400 for bodies, 422 for path ids,
//! 404 for absent rows, 409 for duplicate titles, 500 for store errors.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidTodoId};
use crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::state::AppState;

/// POST /todos - create a todo
async fn create_todo(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.todos().create(req).await?;
    tracing::info!(id = todo.id, "todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /todos - list all todos
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.todos().list().await?;
    Ok(Json(todos))
}

/// GET /todos/{id} - get a single todo
async fn get_todo(
    State(state): State<AppState>,
    ValidTodoId(id): ValidTodoId,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.todos().retrieve(id).await?;
    Ok(Json(todo))
}

/// PUT /todos/{id} - replace a todo
///
/// The body is checked before the id: the id extraction result is held
/// until the body extractor has run.
async fn update_todo(
    State(state): State<AppState>,
    id: Result<ValidTodoId, ApiError>,
    JsonBody(req): JsonBody<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let ValidTodoId(id) = id?;
    let todo = state.todos().update(req.into_todo(id)).await?;
    tracing::info!(id, "todo updated");

    Ok(Json(todo))
}

/// DELETE /todos/{id} - delete a todo
async fn delete_todo(
    State(state): State<AppState>,
    ValidTodoId(id): ValidTodoId,
) -> Result<StatusCode, ApiError> {
    state.todos().delete(id).await?;
    tracing::info!(id, "todo deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
