//! HTTP server command for the todo API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::db::{create_pool_with_options, migrations};
use todoctl_server::{run_server, AppState, MemoryTodoRepository, PgTodoRepository, TodoRepository};

use crate::config::TodoctlConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Create the todo table before serving
    #[arg(long, conflicts_with = "memory")]
    pub migrate: bool,

    /// Keep todos in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &TodoctlConfig) -> Result<()> {
    let server_config = config.server_config(args.bind, args.cors_permissive);

    let repository: Arc<dyn TodoRepository> = if args.memory {
        tracing::warn!("Using in-memory store; todos are lost on exit");
        Arc::new(MemoryTodoRepository::new())
    } else {
        let database_url = config.database_url(args.database_url)?;
        let max_connections = config.max_connections(args.max_connections);

        let pool = create_pool_with_options(&database_url, max_connections)
            .await
            .context("Failed to create database pool")?;

        if args.migrate {
            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;
        }

        Arc::new(PgTodoRepository::new(pool))
    };

    tracing::info!("Starting todoctl server on {}", server_config.bind_addr);

    // Blocks until shutdown
    run_server(AppState::from_arc(repository), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
