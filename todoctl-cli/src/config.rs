//! Configuration loading for the todoctl CLI
//!
//! Sources, highest priority first:
//! 1. Command-line flags
//! 2. Environment (`DATABASE_URL`, also read from `.env` files)
//! 3. `./todoctl.toml`
//! 4. `~/.todoctl/config.toml`
//! 5. Built-in defaults

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use todoctl_server::db::DEFAULT_MAX_CONNECTIONS;
use todoctl_server::ServerConfig;

/// Name of the project-local config file
const LOCAL_CONFIG_FILE: &str = "todoctl.toml";

/// Load environment variables from .env files
///
/// Checks ./.env first, then ~/.todoctl/.env. dotenvy never overwrites
/// variables that are already set, so the real environment always wins.
///
/// Runs before tracing is initialized (clap reads `DATABASE_URL` at parse
/// time), so the loaded paths are returned for the caller to log.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Get the todoctl config directory path (~/.todoctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todoctl"))
}

/// Path of the user-level config file (~/.todoctl/config.toml)
pub fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// TOML configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoctlConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Address to bind, e.g. "127.0.0.1:3000"
    pub bind: Option<SocketAddr>,

    /// Allow any CORS origin
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// PostgreSQL connection string
    pub url: Option<String>,

    /// Pool size
    pub max_connections: Option<u32>,
}

impl TodoctlConfig {
    /// Load config from the global file overlaid by the local one.
    ///
    /// Missing files are skipped; unreadable or invalid files are logged
    /// and skipped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(global) = global_config_path() {
            if let Some(loaded) = Self::load_optional(&global) {
                config = loaded;
            }
        }

        if let Some(local) = Self::load_optional(Path::new(LOCAL_CONFIG_FILE)) {
            config = config.merge(local);
        }

        config
    }

    fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match Self::load_from(path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring config {}: {:#}", path.display(), e);
                None
            }
        }
    }

    /// Read and parse a single TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Merge two configs field by field (overlay wins where set).
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            server: ServerSection {
                bind: overlay.server.bind.or(self.server.bind),
                cors_permissive: overlay.server.cors_permissive.or(self.server.cors_permissive),
            },
            database: DatabaseSection {
                url: overlay.database.url.or(self.database.url),
                max_connections: overlay
                    .database
                    .max_connections
                    .or(self.database.max_connections),
            },
        }
    }

    /// Server settings after applying flag overrides.
    pub fn server_config(&self, bind: Option<SocketAddr>, cors_permissive: bool) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            bind_addr: bind.or(self.server.bind).unwrap_or(defaults.bind_addr),
            cors_permissive: cors_permissive || self.server.cors_permissive.unwrap_or(false),
        }
    }

    /// Database URL from the flag/env value, falling back to the config file.
    pub fn database_url(&self, from_args: Option<String>) -> Result<String> {
        from_args.or_else(|| self.database.url.clone()).context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, \
             ~/.todoctl/.env or [database] url in todoctl.toml",
        )
    }

    pub fn max_connections(&self, from_args: Option<u32>) -> u32 {
        from_args
            .or(self.database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
    /// Show config file paths
    Path,
}

pub fn run_config(args: ConfigArgs, config: &TodoctlConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let rendered =
                toml::to_string_pretty(config).context("Failed to render configuration")?;
            print!("{}", rendered);
        }
        ConfigCommands::Path => {
            if let Some(global) = global_config_path() {
                println!("global: {}", global.display());
            }
            println!("local:  {}", LOCAL_CONFIG_FILE);
        }
    }
    Ok(())
}
