//! refbridge Configuration System
//!
//! Provides configuration for the foreign-reference bridge:
//! - Project configuration (refbridge.toml)
//! - Global user configuration (~/.refbridge/config.toml)
//! - Environment overrides (REFBRIDGE_*)
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.refbridge/config.toml)
//! 2. Project config (./refbridge.toml, searched upward)
//! 3. Environment variables (REFBRIDGE_*)
//!
//! # Example
//!
//! ```no_run
//! use refbridge_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("audit ownership: {:?}", config.audit_ownership());
//! ```

pub mod bridge;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Accepted values for `diagnostics.cast_failures`
pub const CAST_FAILURE_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

// Re-export main types
pub use bridge::{BridgeConfig, DiagnosticsConfig, OwnershipConfig};
pub use loader::{Config, ConfigLoader};
