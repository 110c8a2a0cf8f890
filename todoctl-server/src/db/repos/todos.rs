//! Todo repository backed by PostgreSQL
//!
//! - create: INSERT ... RETURNING, unique violation on title is a conflict
//! - update/delete: affected-row count decides not-found

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, TodoRepository};
use crate::models::{CreateTodoRequest, Todo};

/// PostgreSQL todo repository
#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, input: CreateTodoRequest) -> Result<Todo, DbError> {
        tracing::debug!(title = %input.title, "inserting todo");

        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todo (title, description, completed)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::duplicate_title(&input.title)
            }
            other => DbError::Sqlx(other),
        })
    }

    async fn list(&self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, completed FROM todo ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    async fn retrieve(&self, id: i32) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, completed FROM todo WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn update(&self, todo: Todo) -> Result<Todo, DbError> {
        let result = sqlx::query(
            "UPDATE todo SET title = $1, description = $2, completed = $3 WHERE id = $4",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(todo.id));
        }

        tracing::debug!(id = todo.id, "updated todo");
        Ok(todo)
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        match result.rows_affected() {
            0 => Err(DbError::todo_not_found(id)),
            affected => {
                tracing::debug!(id, affected, "deleted todo");
                Ok(affected)
            }
        }
    }
}
