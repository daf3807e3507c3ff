//! Configuration module
//!
//! Handles loading and managing configuration. Values are layered: built-in
//! defaults, then a config file, then `ATTENDANCE_CHECK_*` environment
//! variables, then command-line flags.

mod env;
mod file;

pub use env::EnvConfig;
pub use file::{find_config, is_yaml_file};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::http::DEFAULT_TIMEOUT_SECS;
use crate::output::OutputFormat;

/// Invalid configuration values
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Base URL must not be empty")]
    EmptyBaseUrl,

    #[error("Timeout must be at least one second")]
    ZeroTimeout,

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API base URL, including the path prefix
    pub base_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Report format (table, json, json-pretty, summary)
    pub format: String,

    /// Register the login check
    pub include_auth: bool,

    /// Request parameters used by the report and login checks
    pub fixtures: Fixtures,

    /// Field names and error substrings the API must honour
    pub contracts: ContractFields,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            format: "table".to_string(),
            include_auth: false,
            fixtures: Fixtures::default(),
            contracts: ContractFields::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    /// Load from the first standard location that exists, or use defaults
    pub fn load_default() -> Result<Self> {
        match find_config() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Overlay values taken from the environment
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(base_url) = &env.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(format) = &env.format {
            self.format = format.clone();
        }
        if let Some(include_auth) = env.include_auth {
            self.include_auth = include_auth;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if OutputFormat::from_str(&self.format).is_none() {
            return Err(ConfigError::UnknownFormat(self.format.clone()));
        }
        Ok(())
    }
}

/// Request parameters for the report and login checks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub pin: String,
    pub start_date: String,
    pub end_date: String,
    /// Category id used by the unit report
    pub unit_id: String,
    /// Explicit `limit` for the second live-log call
    pub live_limit: u32,
    /// First categorical dimension (`type` value and category route)
    pub group_a: String,
    /// Second categorical dimension
    pub group_b: String,
    pub username: String,
    pub password: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            pin: "1131".to_string(),
            start_date: "2025-01-20".to_string(),
            end_date: "2025-01-25".to_string(),
            unit_id: "1".to_string(),
            live_limit: 20,
            group_a: "pembagian1".to_string(),
            group_b: "pembagian2".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Field names and error substrings expected from the API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractFields {
    /// Key that must appear somewhere in the connectivity probe payload
    pub timestamp_field: String,
    pub today_record: Vec<String>,
    pub live_record: Vec<String>,
    pub employee_record: Vec<String>,
    /// Statistics keys; these are checked strictly
    pub stats: Vec<String>,
    pub missing_params_error: String,
    pub not_found_error: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ContractFields {
    fn default() -> Self {
        Self {
            timestamp_field: "currentTime".to_string(),
            today_record: strings(&["pin", "scan_date", "pegawai_nama"]),
            live_record: strings(&["pin", "scan_date", "inoutmode"]),
            employee_record: strings(&["pegawai_pin", "pegawai_nama", "pegawai_nip"]),
            stats: strings(&["total", "present", "absent", "byPembagian1", "byPembagian2"]),
            missing_params_error: "missing required parameters".to_string(),
            not_found_error: "not found".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.include_auth);
        assert_eq!(config.fixtures.pin, "1131");
        assert_eq!(config.contracts.stats.len(), 5);
    }

    #[test]
    fn test_validate() {
        assert_eq!(AppConfig::default().validate(), Ok(()));

        let config = AppConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyBaseUrl));

        let config = AppConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let config = AppConfig {
            format: "xml".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownFormat("xml".to_string()))
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attendance-check.yaml");
        std::fs::write(
            &path,
            "base_url: http://10.0.0.5:3000/api\nfixtures:\n  pin: \"2040\"\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:3000/api");
        assert_eq!(config.fixtures.pin, "2040");
        assert_eq!(config.fixtures.start_date, "2025-01-20");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_save_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.include_auth = true;
        config.contracts.not_found_error = "no such route".to_string();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON config"));
    }

    #[test]
    fn test_apply_env() {
        let mut config = AppConfig::default();
        let env = EnvConfig {
            base_url: Some("http://staging:3000/api".to_string()),
            timeout: Some(3),
            include_auth: Some(true),
            ..Default::default()
        };

        config.apply_env(&env);
        assert_eq!(config.base_url, "http://staging:3000/api");
        assert_eq!(config.timeout_secs, 3);
        assert!(config.include_auth);
        assert_eq!(config.format, "table");
    }
}
