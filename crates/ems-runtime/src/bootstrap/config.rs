//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Locate the configuration file
//! - Read TOML configuration files and map them into the `AppConfig` DTO
//! - Report I/O and parsing errors with context
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No default value logic (defaults are applied during wiring)
//!
//! > **Pure data loading only. Accept whatever is in the file.**

use anyhow::Context;
use std::path::PathBuf;

use ems_core::app_dirs::AppDirs;
use ems_core::config::AppConfig;

/// Env var pointing at an explicit config file.
pub const CONFIG_PATH_ENV_VAR: &str = "EARNMYSCROLL_CONFIG";

/// `EARNMYSCROLL_CONFIG` when set, `{config dir}/config.toml` otherwise.
pub fn resolve_config_path(app_dirs: &AppDirs) -> PathBuf {
    match std::env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => app_dirs.config_file(),
    }
}

/// Load configuration from a TOML file
///
/// **NO validation is performed**:
/// - Empty strings are valid (they are facts)
/// - Missing sections result in empty values (facts)
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}
