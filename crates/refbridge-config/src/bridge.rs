//! Bridge configuration file schema
//!
//! The same schema is used for the project file (`refbridge.toml`) and the
//! global file (`~/.refbridge/config.toml`).

use crate::{ConfigError, ConfigResult, CAST_FAILURE_LEVELS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of one configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Ownership ledger settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<OwnershipConfig>,

    /// Logging of bridge internals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DiagnosticsConfig>,
}

/// `[ownership]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OwnershipConfig {
    /// Record adopt/retain/release events in the per-thread ledger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<bool>,
}

/// `[diagnostics]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Emit a trace record for every retain and release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_refcounts: Option<bool>,

    /// Log level for failed checked casts ("off", "error", ..., "trace")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast_failures: Option<String>,
}

impl BridgeConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration text; `origin` is used in error messages
    pub fn parse(content: &str, origin: &Path) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: origin.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate field values that the schema alone cannot check
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(level) = self
            .diagnostics
            .as_ref()
            .and_then(|d| d.cast_failures.as_deref())
        {
            validate_level("diagnostics.cast_failures", level)?;
        }
        Ok(())
    }

    /// Get the global config file path (~/.refbridge/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".refbridge").join("config.toml"))
    }

    pub fn audit(&self) -> Option<bool> {
        self.ownership.as_ref().and_then(|o| o.audit)
    }

    pub fn trace_refcounts(&self) -> Option<bool> {
        self.diagnostics.as_ref().and_then(|d| d.trace_refcounts)
    }

    pub fn cast_failures(&self) -> Option<&str> {
        self.diagnostics
            .as_ref()
            .and_then(|d| d.cast_failures.as_deref())
    }

    /// Merge another config into this one.
    /// Values set in `other` take precedence, field by field.
    pub fn merge(&mut self, other: &BridgeConfig) {
        if let Some(audit) = other.audit() {
            self.ownership.get_or_insert_with(Default::default).audit = Some(audit);
        }
        if let Some(trace) = other.trace_refcounts() {
            self.diagnostics
                .get_or_insert_with(Default::default)
                .trace_refcounts = Some(trace);
        }
        if let Some(level) = other.cast_failures() {
            self.diagnostics
                .get_or_insert_with(Default::default)
                .cast_failures = Some(level.to_string());
        }
    }
}

/// Validate a log level name
pub(crate) fn validate_level(field: &str, value: &str) -> ConfigResult<()> {
    if !CAST_FAILURE_LEVELS.contains(&value.to_lowercase().as_str()) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!(
                "must be one of {}, got '{}'",
                CAST_FAILURE_LEVELS.join(", "),
                value
            ),
        });
    }
    Ok(())
}
