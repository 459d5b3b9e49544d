//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DEWDROP_CATALOG_PATH` - Product catalog JSON file (default: catalog.json)
//! - `DEWDROP_CART_PATH` - Cart snapshot JSON file (default: cart.json)
//! - `DEWDROP_CURATED_LIMIT` - Size of featured/best-seller lists (default: 8)
//! - `DEWDROP_LOG_FORMAT` - `text` or `json` (default: text)
//! - `RUST_LOG` - Tracing filter (default: `dewdrop_cli=info,dewdrop_core=info`)

use std::path::PathBuf;

use dewdrop_core::catalog::CURATED_LIST_LIMIT;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Product catalog snapshot, a JSON array of product documents
    pub catalog_path: PathBuf,
    /// Cart snapshot, a JSON array of line-item records
    pub cart_path: PathBuf,
    /// Cap for curated lists
    pub curated_limit: usize,
    /// Tracing output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let curated_limit = get_or("DEWDROP_CURATED_LIMIT", &CURATED_LIST_LIMIT.to_string())
            .parse::<usize>()
            .map_err(|e| e.to_string())
            .and_then(|n| {
                if n == 0 {
                    Err("must be greater than zero".to_string())
                } else {
                    Ok(n)
                }
            })
            .map_err(|e| ConfigError::InvalidEnvVar("DEWDROP_CURATED_LIMIT".to_string(), e))?;

        let log_format = match get_or("DEWDROP_LOG_FORMAT", "text").to_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "DEWDROP_LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            catalog_path: PathBuf::from(get_or("DEWDROP_CATALOG_PATH", "catalog.json")),
            cart_path: PathBuf::from(get_or("DEWDROP_CART_PATH", "cart.json")),
            curated_limit,
            log_format,
        })
    }
}
