//! Engine configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Engine configuration loaded from environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// sqlx SQLite URL
    pub database_url: String,
    /// Pool size; forced to 1 for in-memory databases
    pub database_max_connections: u32,

    pub server_host: String,
    pub server_port: u16,

    /// Insert reference products, stores and warehouses into empty tables on startup
    pub seed_demo_data: bool,

    /// Scratch directory for the legacy store manager (system temp dir if unset)
    pub legacy_scratch_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite:fulfilment.db?mode=rwc".to_string());

        let database_max_connections = if database_url.contains(":memory:") {
            1
        } else {
            lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?
        };

        Ok(Self {
            database_url,
            database_max_connections,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: lookup("SERVER_PORT")
                .or_else(|| lookup("PORT"))
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            legacy_scratch_dir: lookup("LEGACY_SCRATCH_DIR")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }
}
