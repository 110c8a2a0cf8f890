//! todoctl CLI - to-do API server
//!
//! Entry point for the `todoctl` binary:
//! - `serve`: run the HTTP API (PostgreSQL or in-memory store)
//! - `migrate`: create the todo table
//! - `config`: inspect the merged configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

use config::TodoctlConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "To-do CRUD API backed by PostgreSQL",
    long_about = "Serve a small JSON API for to-do items (create, list, retrieve, update, \
                  delete) backed by a single PostgreSQL table."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the todo table if it does not exist
    Migrate(commands::migrate::MigrateArgs),
    /// Inspect todoctl configuration (show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads DATABASE_URL
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    if env_files.is_empty() {
        debug!("No .env files found (current dir or ~/.todoctl)");
    } else {
        for path in &env_files {
            info!("Loaded environment from {}", path.display());
        }
    }

    let config = TodoctlConfig::load();

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &config).await,
        Commands::Migrate(args) => commands::run_migrate(args, &config).await,
        Commands::Config(args) => config::run_config(args, &config),
    };

    tracing_setup::shutdown_otel();
    result
}
