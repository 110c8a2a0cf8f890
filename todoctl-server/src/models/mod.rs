//! Domain models
//!
//! Request bodies are plain serde DTOs; path identifiers are validated
//! through [`TodoId`]. Invalid input returns ValidationError, not panic.

pub mod todo;
pub mod validation;

pub use todo::{CreateTodoRequest, Todo, TodoId, UpdateTodoRequest};
pub use validation::ValidationError;
