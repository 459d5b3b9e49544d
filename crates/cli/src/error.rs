//! CLI error type.

use std::path::PathBuf;

use dewdrop_core::cart::{CartError, SnapshotError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A file could not be read or written.
    #[error("Failed to access {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// The product catalog is not a valid list of products.
    #[error("Invalid catalog {}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The cart snapshot document is unreadable.
    #[error("Cart snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A cart operation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// A filter value on the command line could not be read.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

/// Result type alias for `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
