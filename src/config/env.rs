//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "ATTENDANCE_CHECK";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Base URL from ATTENDANCE_CHECK_BASE_URL
    pub base_url: Option<String>,
    /// Timeout from ATTENDANCE_CHECK_TIMEOUT
    pub timeout: Option<u64>,
    /// Output format from ATTENDANCE_CHECK_FORMAT
    pub format: Option<String>,
    /// Login check from ATTENDANCE_CHECK_INCLUDE_AUTH
    pub include_auth: Option<bool>,
    /// Config file from ATTENDANCE_CHECK_CONFIG
    pub config_file: Option<String>,
    /// Verbose from ATTENDANCE_CHECK_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            timeout: get_env_parse("TIMEOUT"),
            format: get_env("FORMAT"),
            include_auth: get_env_bool("INCLUDE_AUTH"),
            config_file: get_env("CONFIG"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        *self != Self::default()
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables in tests
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    fn var(mut self, name: &str, value: impl ToString) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_{name}"), value.to_string()));
        self
    }

    pub fn base_url(self, url: impl Into<String>) -> Self {
        self.var("BASE_URL", url.into())
    }

    pub fn timeout(self, timeout: u64) -> Self {
        self.var("TIMEOUT", timeout)
    }

    pub fn include_auth(self, include_auth: &str) -> Self {
        self.var("INCLUDE_AUTH", include_auth)
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}
