//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::bridge::{validate_level, BridgeConfig};
use crate::ConfigResult;
use std::env;
use std::path::{Path, PathBuf};

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "refbridge.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.refbridge/config.toml) - lowest priority
/// 2. Project config (./refbridge.toml) - overrides global
/// 3. Environment variables (REFBRIDGE_*) - overrides project
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective configuration after merging all sources
    pub bridge: BridgeConfig,

    /// Directory where refbridge.toml was found
    pub config_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use an explicit global config file instead of ~/.refbridge/config.toml
    pub fn with_global_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find refbridge.toml, merges it over the
    /// global config, then applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (config_root, project) = self.find_project_config(start_dir)?;
        self.assemble(project, config_root)
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = BridgeConfig::load_from_file(config_path)?;
        let config_root = config_path.parent().map(|p| p.to_path_buf());
        self.assemble(project, config_root)
    }

    fn assemble(&mut self, project: BridgeConfig, config_root: Option<PathBuf>) -> ConfigResult<Config> {
        let mut bridge = self.load_global_config()?;
        bridge.merge(&project);
        let bridge = self.apply_env_overrides(bridge)?;

        Ok(Config {
            bridge,
            config_root,
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(&self, start_dir: &Path) -> ConfigResult<(Option<PathBuf>, BridgeConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let config = BridgeConfig::load_from_file(&config_path)?;
                return Ok((Some(current), config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                // Reached filesystem root without finding refbridge.toml
                None => return Ok((None, BridgeConfig::default())),
            }
        }
    }

    /// Load global configuration; a missing file yields the default
    fn load_global_config(&mut self) -> ConfigResult<BridgeConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match BridgeConfig::global_config_path() {
                Ok(path) => {
                    self.global_config_path = Some(path.clone());
                    path
                }
                // No home directory means no global config
                Err(_) => return Ok(BridgeConfig::default()),
            },
        };

        if !path.exists() {
            return Ok(BridgeConfig::default());
        }

        BridgeConfig::load_from_file(&path)
    }

    /// Apply environment variable overrides
    ///
    /// - REFBRIDGE_AUDIT=true|false
    /// - REFBRIDGE_TRACE_REFCOUNTS=true|false
    /// - REFBRIDGE_CAST_FAILURES=<level>
    fn apply_env_overrides(&self, mut config: BridgeConfig) -> ConfigResult<BridgeConfig> {
        if let Ok(audit) = env::var("REFBRIDGE_AUDIT") {
            config.ownership.get_or_insert_with(Default::default).audit = Some(parse_flag(&audit));
        }

        if let Ok(trace) = env::var("REFBRIDGE_TRACE_REFCOUNTS") {
            config
                .diagnostics
                .get_or_insert_with(Default::default)
                .trace_refcounts = Some(parse_flag(&trace));
        }

        if let Ok(level) = env::var("REFBRIDGE_CAST_FAILURES") {
            validate_level("REFBRIDGE_CAST_FAILURES", &level)?;
            config
                .diagnostics
                .get_or_insert_with(Default::default)
                .cast_failures = Some(level);
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    /// Whether the ownership ledger is enabled, if configured
    pub fn audit_ownership(&self) -> Option<bool> {
        self.bridge.audit()
    }

    /// Whether retain/release tracing is enabled, if configured
    pub fn trace_refcounts(&self) -> Option<bool> {
        self.bridge.trace_refcounts()
    }

    /// Log level name for failed casts, if configured
    pub fn cast_failures(&self) -> Option<&str> {
        self.bridge.cast_failures()
    }

    /// Directory containing refbridge.toml
    pub fn config_root(&self) -> Option<&Path> {
        self.config_root.as_deref()
    }

    /// Whether a project config file was found
    pub fn has_project_config(&self) -> bool {
        self.config_root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        fs::write(&config_path, content).unwrap();
        config_path
    }

    fn isolated_loader(dir: &TempDir) -> ConfigLoader {
        ConfigLoader::new().with_global_config_path(dir.path().join("no-global.toml"))
    }

    #[test]
    #[serial]
    fn test_load_project_config() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[ownership]
audit = false
"#,
        );

        let mut loader = isolated_loader(&temp_dir);
        let config = loader.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(config.audit_ownership(), Some(false));
        assert!(config.has_project_config());
    }

    #[test]
    #[serial]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[diagnostics]
cast_failures = "info"
"#,
        );

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let mut loader = isolated_loader(&temp_dir);
        let config = loader.load_from_directory(&sub_dir).unwrap();

        assert_eq!(config.cast_failures(), Some("info"));
        assert_eq!(config.config_root(), Some(temp_dir.path()));
    }

    #[test]
    #[serial]
    fn test_env_override_audit() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[ownership]
audit = false
"#,
        );

        env::set_var("REFBRIDGE_AUDIT", "yes");

        let mut loader = isolated_loader(&temp_dir);
        let config = loader.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(config.audit_ownership(), Some(true));

        env::remove_var("REFBRIDGE_AUDIT");
    }

    #[test]
    #[serial]
    fn test_env_override_invalid_level() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("REFBRIDGE_CAST_FAILURES", "shout");

        let mut loader = isolated_loader(&temp_dir);
        let result = loader.load_from_directory(temp_dir.path());

        env::remove_var("REFBRIDGE_CAST_FAILURES");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("off"));
    }
}
