//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use crate::models::RateSelectionStrategy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use tracing::debug;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub pricing: PricingSettings,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Flat-file storage configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per collection; `None` keeps data in memory
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Load the bundled seed data when the store is empty
    #[serde(default = "default_seed_on_start")]
    pub seed_on_start: bool,
}

fn default_seed_on_start() -> bool {
    true
}

/// Pricing engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Longest bookable stay in nights
    #[serde(default = "default_max_booking_nights")]
    pub max_booking_nights: i64,

    /// Days in a pro-rated month
    #[serde(default = "default_monthly_proration_days")]
    pub monthly_proration_days: u32,

    /// Strategy used for room types without a pricing configuration
    #[serde(default)]
    pub default_strategy: RateSelectionStrategy,
}

fn default_max_booking_nights() -> i64 {
    730
}

fn default_monthly_proration_days() -> u32 {
    30
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.cors_origins", Vec::<String>::new())?
            .set_default("storage.seed_on_start", true)?
            .set_default("pricing.max_booking_nights", 730)?
            .set_default("pricing.monthly_proration_days", 30)?
            .set_default("pricing.default_strategy", "duration_based")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with FLEXSPACE_ prefix
            .add_source(
                Environment::with_prefix("FLEXSPACE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        debug!(
            run_mode = %run_mode,
            data_dir = ?app.storage.data_dir,
            max_booking_nights = app.pricing.max_booking_nights,
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("FLEXSPACE").separator("__"))
            .build()?;

        debug!(path, "Loading configuration file");
        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_on_start: default_seed_on_start(),
        }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            max_booking_nights: default_max_booking_nights(),
            monthly_proration_days: default_monthly_proration_days(),
            default_strategy: RateSelectionStrategy::default(),
        }
    }
}
