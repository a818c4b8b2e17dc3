//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `FORCELINK_INSTANCE_URL` is set, loads from environment variables
//!    and returns any error they produce
//! 2. Otherwise falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Every loaded config is validated before it is returned.
//!
//! ## Environment Variables
//! - `FORCELINK_INSTANCE_URL`: Org instance URL (required)
//! - `FORCELINK_API_VERSION`: REST API version, e.g. `v45.0`
//! - `FORCELINK_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `FORCELINK_USER_AGENT`: User agent sent with every request
//! - `FORCELINK_INSERT_BATCH_SIZE`: Records per insert request
//! - `FORCELINK_UPDATE_BATCH_SIZE`: Records per update request
//! - `FORCELINK_DELETE_BATCH_SIZE`: Ids per delete request
//! - `FORCELINK_NO_PROXY`: `true` to ignore system proxy settings
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./forcelink.json` or `./forcelink.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent directory
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use forcelink_domain::{BatchLimits, ForceConfig, ForceError, Result};

const INSTANCE_URL_VAR: &str = "FORCELINK_INSTANCE_URL";

const CONFIG_FILE_NAMES: [&str; 4] = ["forcelink.json", "forcelink.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// The environment wins whenever it names an instance URL; a file is only
/// consulted when it does not.
///
/// # Errors
/// Returns `ForceError::Config` if:
/// - An environment variable is invalid (no file fallback then)
/// - No instance URL is in the environment and no config file is found
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<ForceConfig> {
    if optional_env_var(INSTANCE_URL_VAR).is_none() {
        tracing::debug!(var = INSTANCE_URL_VAR, "Instance URL not set, loading configuration from file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `FORCELINK_INSTANCE_URL` is required; every other variable falls
/// back to its default.
///
/// # Errors
/// Returns `ForceError::Config` if the instance URL is missing, a variable
/// has an invalid value, or the result fails validation.
pub fn load_from_env() -> Result<ForceConfig> {
    let mut config = ForceConfig::new(env_var(INSTANCE_URL_VAR)?);

    if let Some(version) = optional_env_var("FORCELINK_API_VERSION") {
        config.api_version = version;
    }
    if let Some(timeout) = env_parse::<u64>("FORCELINK_TIMEOUT_SECS", "timeout")? {
        config.timeout_secs = timeout;
    }
    config.user_agent = optional_env_var("FORCELINK_USER_AGENT");

    let defaults = BatchLimits::default();
    config.batch_limits = BatchLimits {
        insert: env_parse("FORCELINK_INSERT_BATCH_SIZE", "insert batch size")?.unwrap_or(defaults.insert),
        update: env_parse("FORCELINK_UPDATE_BATCH_SIZE", "update batch size")?.unwrap_or(defaults.update),
        delete: env_parse("FORCELINK_DELETE_BATCH_SIZE", "delete batch size")?.unwrap_or(defaults.delete),
    };
    config.no_proxy = env_parse("FORCELINK_NO_PROXY", "proxy flag")?.unwrap_or(false);

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ForceError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ForceConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ForceError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ForceError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ForceError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ForceConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ForceError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ForceError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ForceError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
            dirs.push(exe_dir.join(".."));
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key)
        .ok_or_else(|| ForceError::Config(format!("Missing required environment variable: {key}")))
}

/// Non-empty environment variable, if set.
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional numeric environment variable.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ForceError::Config(format!("Invalid {what} in {key}: {e}")))
        })
        .transpose()
}
