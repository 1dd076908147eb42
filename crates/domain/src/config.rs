//! Configuration structures
//!
//! Every field has a default so partial JSON/TOML files deserialize; the
//! loader in `storefront-infra` fills these from files or `STOREFRONT_*`
//! environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_MAX_ATTEMPTS, DEFAULT_ROUTE_PREFIX,
    DEFAULT_TIMEOUT_MS,
};
use crate::{Result, StorefrontError};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Check cross-field constraints that serde defaults cannot express.
    ///
    /// # Errors
    /// Returns `StorefrontError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.logging.validate()
    }
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the backend, without a trailing path
    pub base_url: String,
    /// Per-call timeout, applied to every request including the refresh call
    pub timeout_ms: u64,
    /// Path prefix shared by every backend route
    pub route_prefix: String,
    /// Override for the login path (default: `<route_prefix>/auth/login`)
    pub login_path: Option<String>,
    /// Override for the refresh path (default: `<route_prefix>/auth/refresh`)
    pub refresh_path: Option<String>,
    /// Transport-level attempts for idempotent requests on connection failure
    pub max_attempts: usize,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            login_path: None,
            refresh_path: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Per-call timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Resolved login path.
    #[must_use]
    pub fn login_path(&self) -> String {
        self.login_path.clone().unwrap_or_else(|| join_route(&self.route_prefix, "auth/login"))
    }

    /// Resolved refresh path.
    #[must_use]
    pub fn refresh_path(&self) -> String {
        self.refresh_path
            .clone()
            .unwrap_or_else(|| join_route(&self.route_prefix, "auth/refresh"))
    }

    fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(StorefrontError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(StorefrontError::Config("api.timeout_ms must be greater than zero".into()));
        }
        if self.max_attempts == 0 {
            return Err(StorefrontError::Config("api.max_attempts must be at least 1".into()));
        }
        let overrides =
            [("api.login_path", &self.login_path), ("api.refresh_path", &self.refresh_path)];
        for (field, path) in overrides {
            if let Some(path) = path {
                if !path.starts_with('/') {
                    return Err(StorefrontError::Config(format!(
                        "{field} must start with '/', got '{path}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Where the session (token pair + profile) is persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// JSON file backing the credential store; in-memory when unset
    pub path: Option<String>,
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(StorefrontError::Config("logging.level must not be empty".into()));
        }
        Ok(())
    }
}

/// Join a route prefix and a relative route with exactly one slash between.
pub(crate) fn join_route(prefix: &str, route: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), route.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_auth_paths_under_prefix() {
        let api = ApiConfig::default();
        assert_eq!(api.login_path(), "/api/tiktak/auth/login");
        assert_eq!(api.refresh_path(), "/api/tiktak/auth/refresh");
        assert_eq!(api.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn explicit_auth_paths_win_over_prefix() {
        let api = ApiConfig {
            route_prefix: "/v2/".into(),
            login_path: Some("/sessions".into()),
            ..Default::default()
        };
        assert_eq!(api.login_path(), "/sessions");
        assert_eq!(api.refresh_path(), "/v2/auth/refresh");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.api.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(StorefrontError::Config(_))));

        config.api.base_url = "http://localhost:8080".into();
        config.api.timeout_ms = 0;
        assert!(matches!(config.validate(), Err(StorefrontError::Config(_))));

        config.api.timeout_ms = 500;
        config.api.refresh_path = Some("auth/refresh".into());
        assert!(matches!(config.validate(), Err(StorefrontError::Config(_))));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "api": { "timeout_ms": 2500 } }"#).unwrap();
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.logging.level, "info");
        assert!(config.credentials.path.is_none());
    }
}
