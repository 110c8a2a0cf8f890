//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool with an explicit limit, handed to repositories at construction
//! - One statement per operation, no check-then-write
//! - Rely on DB constraints and affected-row counts for conflicts and existence

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
