//! Configuration loader
//!
//! Loads client configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Start from defaults
//! 2. If a config file is found (see [`probe_config_paths`]), load it
//! 3. Apply any `STOREFRONT_*` environment variables on top
//! 4. Validate the result
//!
//! ## Environment Variables
//! - `STOREFRONT_API_BASE_URL`: Backend scheme and host
//! - `STOREFRONT_API_TIMEOUT_MS`: Per-call timeout in milliseconds
//! - `STOREFRONT_API_ROUTE_PREFIX`: Path prefix shared by all routes
//! - `STOREFRONT_LOGIN_PATH`: Override for the login path
//! - `STOREFRONT_REFRESH_PATH`: Override for the refresh path
//! - `STOREFRONT_API_MAX_ATTEMPTS`: Attempts for idempotent requests on
//!   connection failure
//! - `STOREFRONT_API_USER_AGENT`: User-Agent header value
//! - `STOREFRONT_CREDENTIALS_PATH`: Session file; in-memory when unset
//! - `STOREFRONT_LOG_LEVEL`: Default tracing filter
//! - `STOREFRONT_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./storefront.json` or `./storefront.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use storefront_domain::constants::ENV_PREFIX;
use storefront_domain::{Config, Result, StorefrontError};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 4] =
    ["storefront.json", "storefront.toml", "config.json", "config.toml"];

/// Load configuration from the first config file found, then environment.
///
/// Missing files are not an error; defaults apply.
///
/// # Errors
/// Returns `StorefrontError::Config` if:
/// - A config file exists but cannot be parsed
/// - An environment variable has an invalid value
/// - The merged configuration fails validation
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => read_config_file(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_env(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from defaults and environment variables only.
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `StorefrontError::Config` if a variable has an invalid value or
/// the result fails validation.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env(&mut config)?;
    config.validate()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `StorefrontError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StorefrontError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            StorefrontError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    let config = read_config_file(&config_path)?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| StorefrontError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `StorefrontError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StorefrontError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(StorefrontError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Searches the current working directory, then the executable's directory,
/// for `storefront.{json,toml}` and `config.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Overlay every `STOREFRONT_*` variable that is set.
fn apply_env(config: &mut Config) -> Result<()> {
    let api = &mut config.api;
    if let Some(base_url) = env_opt("API_BASE_URL") {
        api.base_url = base_url;
    }
    if let Some(timeout_ms) = env_parse::<u64>("API_TIMEOUT_MS")? {
        api.timeout_ms = timeout_ms;
    }
    if let Some(prefix) = env_opt("API_ROUTE_PREFIX") {
        api.route_prefix = prefix;
    }
    if let Some(path) = env_opt("LOGIN_PATH") {
        api.login_path = Some(path);
    }
    if let Some(path) = env_opt("REFRESH_PATH") {
        api.refresh_path = Some(path);
    }
    if let Some(attempts) = env_parse::<usize>("API_MAX_ATTEMPTS")? {
        api.max_attempts = attempts;
    }
    if let Some(agent) = env_opt("API_USER_AGENT") {
        api.user_agent = Some(agent);
    }
    if let Some(path) = env_opt("CREDENTIALS_PATH") {
        config.credentials.path = Some(path);
    }
    if let Some(level) = env_opt("LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool(&format!("{ENV_PREFIX}LOG_JSON"), config.logging.json);
    Ok(())
}

/// Read `STOREFRONT_<suffix>`, treating empty values as unset.
fn env_opt(suffix: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{suffix}")).ok().filter(|value| !value.trim().is_empty())
}

/// Parse `STOREFRONT_<suffix>` when set.
///
/// # Errors
/// Returns `StorefrontError::Config` naming the variable if parsing fails.
fn env_parse<T>(suffix: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(suffix)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                StorefrontError::Config(format!("Invalid {ENV_PREFIX}{suffix} '{raw}': {e}"))
            })
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
