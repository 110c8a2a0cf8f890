//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per call, no transactions
//! - "Zero rows affected" is the only existence check for update/delete
//! - Store errors are returned as-is; the HTTP layer picks the status

pub mod memory;
pub mod todos;

use async_trait::async_trait;

use crate::models::{CreateTodoRequest, Todo};

pub use memory::MemoryTodoRepository;
pub use todos::PgTodoRepository;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("constraint violation: {message}")]
    ConstraintViolation { message: String },
}

impl DbError {
    pub(crate) fn todo_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate_title(title: &str) -> Self {
        Self::ConstraintViolation {
            message: format!("todo with title '{}' already exists", title),
        }
    }
}

/// Storage operations for to-do items.
///
/// Implemented by [`PgTodoRepository`] for PostgreSQL and by
/// [`MemoryTodoRepository`] for tests and database-less runs.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new item and return it with its generated id.
    ///
    /// Fails with [`DbError::ConstraintViolation`] when the title is taken.
    async fn create(&self, input: CreateTodoRequest) -> Result<Todo, DbError>;

    /// All items, ordered by id. Empty when the table is empty.
    async fn list(&self) -> Result<Vec<Todo>, DbError>;

    /// Fails with [`DbError::NotFound`] when no row has `id`.
    async fn retrieve(&self, id: i32) -> Result<Todo, DbError>;

    /// Replace title, description and completed for `todo.id`.
    ///
    /// Returns the record as supplied; the row is not re-read.
    async fn update(&self, todo: Todo) -> Result<Todo, DbError>;

    /// Remove the row and return the affected count.
    async fn delete(&self, id: i32) -> Result<u64, DbError>;
}
