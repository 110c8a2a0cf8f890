//! todoctl-server: HTTP server for a single to-do resource
//!
//! Layers, leaf-first:
//! - `db::pool` / `db::migrations`: PostgreSQL pool and schema
//! - `db::repos`: `TodoRepository` trait with Postgres and in-memory backends
//! - `http`: Axum handlers, status mapping and server wiring

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{DbError, MemoryTodoRepository, PgTodoRepository, TodoRepository};
pub use http::{build_router, run_server, ApiError, ServerConfig};
pub use models::{CreateTodoRequest, Todo, UpdateTodoRequest};
pub use state::AppState;
