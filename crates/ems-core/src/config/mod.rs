//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation
//!
//! > **This module contains data only, no policy, no validation.**

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the backend platform (may be empty - this is a fact, not an error)
    pub backend_url: String,

    /// Public (anon) API key sent with every request
    pub backend_anon_key: String,

    /// Per-request timeout in seconds, 0 when not configured
    pub request_timeout_secs: u64,

    /// Whether a failed onboarding-flag write keeps the user on the wizard
    pub block_onboarding_on_write_failure: bool,

    /// Session file path (path info only, no existence check)
    pub session_file_path: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let get = |section: &str, key: &str| toml_value.get(section).and_then(|s| s.get(key));

        Ok(Self {
            backend_url: get("backend", "url")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            backend_anon_key: get("backend", "anon_key")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_secs: get("backend", "request_timeout_secs")
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            block_onboarding_on_write_failure: get("onboarding", "block_on_write_failure")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            session_file_path: PathBuf::from(
                get("storage", "session_file")
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            backend_url: String::new(),
            backend_anon_key: String::new(),
            request_timeout_secs: 0,
            block_onboarding_on_write_failure: false,
            session_file_path: PathBuf::new(),
        }
    }

    /// Create AppConfig with system-default paths for production use
    ///
    /// The base directory should be computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            session_file_path: data_dir.join("session.json"),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_value: Value = toml::from_str("[backend]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Empty values are valid facts
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [backend]
            url = "https://project.supabase.co"
            anon_key = "anon"
            request_timeout_secs = 12

            [onboarding]
            block_on_write_failure = true

            [storage]
            session_file = "/tmp/ems/session.json"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.backend_url, "https://project.supabase.co");
        assert_eq!(config.backend_anon_key, "anon");
        assert_eq!(config.request_timeout_secs, 12);
        assert!(config.block_onboarding_on_write_failure);
        assert_eq!(config.session_file_path, PathBuf::from("/tmp/ems/session.json"));
    }

    #[test]
    fn test_from_toml_clamps_negative_timeout_to_zero() {
        let toml_value: Value = toml::from_str("[backend]\nrequest_timeout_secs = -5\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.request_timeout_secs, 0);
    }

    #[test]
    fn test_with_system_defaults_creates_session_path() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/tmp/test"));

        assert_eq!(config.session_file_path, PathBuf::from("/tmp/test/session.json"));
        assert_eq!(config.backend_url, "");
        assert!(!config.block_onboarding_on_write_failure);
    }
}
