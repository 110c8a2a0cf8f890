//! To-do item and its request bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// A persisted to-do item.
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Body of `POST /todos`. The caller cannot choose the id.
///
/// Absent fields decode to their zero values, `title` included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body of `PUT /todos/{id}`: a full replacement, not a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl UpdateTodoRequest {
    /// Pair the body with the path id to form the replacement record.
    pub fn into_todo(self, id: i32) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}

/// Validated to-do identifier taken from a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(i32);

impl TodoId {
    /// Parse a path segment as a base-10 `i32`.
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::TodoId;
    ///
    /// assert_eq!(TodoId::parse("42").unwrap().get(), 42);
    /// assert!(TodoId::parse("abc").is_err());
    /// assert!(TodoId::parse("0x10").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        s.parse::<i32>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                value: s.to_owned(),
                reason: "must be a base-10 integer",
            })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}
