//! In-memory todo repository
//!
//! Same contract as the PostgreSQL repository without a database:
//! - ids come from a counter starting at 1 and are never reused
//! - the counter stops at `i32::MAX` like a SERIAL sequence
//! - titles are unique among current rows
//! - `fail_next` makes the next call fail like a lost connection

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, TodoRepository};
use crate::models::{CreateTodoRequest, Todo};

/// Thread-safe in-memory repository. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryTodoRepository {
    rows: Arc<RwLock<Rows>>,
    fail_next: Arc<AtomicBool>,
}

#[derive(Debug)]
struct Rows {
    by_id: BTreeMap<i32, Todo>,
    /// `None` once every `i32` id has been handed out
    next_id: Option<i32>,
}

impl Default for Rows {
    fn default() -> Self {
        Self {
            by_id: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

impl Rows {
    fn title_taken(&self, title: &str, except: Option<i32>) -> bool {
        self.by_id
            .values()
            .any(|t| t.title == title && Some(t.id) != except)
    }
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next repository call fail with a store error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check_injected_failure(&self) -> Result<(), DbError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn create(&self, input: CreateTodoRequest) -> Result<Todo, DbError> {
        self.check_injected_failure()?;

        let mut rows = self.rows.write().await;
        if rows.title_taken(&input.title, None) {
            return Err(DbError::duplicate_title(&input.title));
        }

        let id = rows.next_id.ok_or_else(|| {
            DbError::Sqlx(sqlx::Error::Protocol(
                "nextval: reached maximum value of sequence \"todo_id_seq\"".into(),
            ))
        })?;
        rows.next_id = id.checked_add(1);

        let todo = Todo {
            id,
            title: input.title,
            description: input.description,
            completed: input.completed,
        };
        rows.by_id.insert(id, todo.clone());
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, DbError> {
        self.check_injected_failure()?;

        let rows = self.rows.read().await;
        Ok(rows.by_id.values().cloned().collect())
    }

    async fn retrieve(&self, id: i32) -> Result<Todo, DbError> {
        self.check_injected_failure()?;

        let rows = self.rows.read().await;
        rows.by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn update(&self, todo: Todo) -> Result<Todo, DbError> {
        self.check_injected_failure()?;

        let mut rows = self.rows.write().await;
        if !rows.by_id.contains_key(&todo.id) {
            return Err(DbError::todo_not_found(todo.id));
        }
        // Postgres reports this as a plain unique violation on UPDATE
        if rows.title_taken(&todo.title, Some(todo.id)) {
            return Err(DbError::Sqlx(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint \"todo_title_key\": {}",
                todo.title
            ))));
        }

        rows.by_id.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        self.check_injected_failure()?;

        let mut rows = self.rows.write().await;
        match rows.by_id.remove(&id) {
            Some(_) => Ok(1),
            None => Err(DbError::todo_not_found(id)),
        }
    }
}
