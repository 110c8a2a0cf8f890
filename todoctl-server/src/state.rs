//! Application state shared across handlers

use std::sync::Arc;

use crate::db::TodoRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    todos: Arc<dyn TodoRepository>,
}

impl AppState {
    pub fn new(todos: impl TodoRepository + 'static) -> Self {
        Self::from_arc(Arc::new(todos))
    }

    /// Build state around a repository that is already shared elsewhere.
    pub fn from_arc(todos: Arc<dyn TodoRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { todos }),
        }
    }

    pub fn todos(&self) -> &dyn TodoRepository {
        self.inner.todos.as_ref()
    }
}
