//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `LEATHER_LANE_DATA_DIR` - Directory holding local storage (default: `.leather-lane`)
//! - `LEATHER_LANE_CATALOG_PATH` - JSON catalog to use instead of the built-in one
//! - `LEATHER_LANE_ORDER_DELAY_MS` - Simulated order processing delay (default: 2000)
//! - `LEATHER_LANE_SUGGEST_DEBOUNCE_MS` - Search suggestion debounce (default: 300)
//! - `LEATHER_LANE_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".leather-lane";
const DEFAULT_ORDER_DELAY_MS: u64 = 2_000;
const DEFAULT_SUGGEST_DEBOUNCE_MS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the local storage file
    pub data_dir: PathBuf,
    /// Optional catalog file replacing the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// How long "placing" an order takes
    pub order_processing_delay: Duration,
    /// Quiet period before search suggestions are recomputed
    pub suggestion_debounce: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            order_processing_delay: Duration::from_millis(DEFAULT_ORDER_DELAY_MS),
            suggestion_debounce: Duration::from_millis(DEFAULT_SUGGEST_DEBOUNCE_MS),
            log_format: LogFormat::Pretty,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("LEATHER_LANE_DATA_DIR")
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let catalog_path = lookup("LEATHER_LANE_CATALOG_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let order_processing_delay =
            get_millis(&lookup, "LEATHER_LANE_ORDER_DELAY_MS", DEFAULT_ORDER_DELAY_MS)?;
        let suggestion_debounce = get_millis(
            &lookup,
            "LEATHER_LANE_SUGGEST_DEBOUNCE_MS",
            DEFAULT_SUGGEST_DEBOUNCE_MS,
        )?;
        let log_format = match lookup("LEATHER_LANE_LOG_FORMAT") {
            Some(value) => value.parse().map_err(|e: String| {
                ConfigError::InvalidEnvVar("LEATHER_LANE_LOG_FORMAT".to_string(), e)
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            data_dir,
            catalog_path,
            order_processing_delay,
            suggestion_debounce,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a millisecond duration, falling back to `default` when unset.
fn get_millis<F>(lookup: &F, key: &str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map_or(Ok(default), |value| value.trim().parse::<u64>())
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
