//! Configuration management for the Inventory Tracker
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with INV_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    #[validate]
    pub server: ServerConfig,

    /// Record store configuration
    #[validate]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ServerConfig {
    /// Server port
    #[validate(range(min = 1))]
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Which record store implementation to run against
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Google Sheets spreadsheet
    Sheets,
    /// Process-local tables, lost on restart
    Memory,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Spreadsheet ID holding the Inward, PO and TransactionHistory sheets
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Service account key, raw JSON or base64-encoded JSON
    #[serde(default)]
    pub credentials: String,

    /// Upper bound for each round trip to the store
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("INV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("store.backend", "sheets")?
            .set_default("store.request_timeout_secs", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (INV_ prefix)
            .add_source(
                Environment::with_prefix("INV")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    /// Field ranges plus the cross-field requirements of the sheets backend
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Message(format!("invalid configuration: {}", e)))?;

        if self.store.backend == StoreBackend::Sheets {
            if self.store.spreadsheet_id.trim().is_empty() {
                return Err(ConfigError::Message(
                    "store.spreadsheet_id is required for the sheets backend".into(),
                ));
            }
            if self.store.credentials.trim().is_empty() {
                return Err(ConfigError::Message(
                    "store.credentials is required for the sheets backend".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}
