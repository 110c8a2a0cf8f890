//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::db::{create_pool, migrations};

use crate::config::TodoctlConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create the todo table and exit
pub async fn run_migrate(args: MigrateArgs, config: &TodoctlConfig) -> Result<()> {
    let database_url = config.database_url(args.database_url)?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    println!("Schema is up to date");
    Ok(())
}
