//! Configuration loader
//!
//! Loads [`UmapiConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variables are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `UMSYNC_ORGANIZATION_ID`: Organization id (`...@AdobeOrg`)
//! - `UMSYNC_CLIENT_ID`: OAuth client id, also the API key
//! - `UMSYNC_CLIENT_SECRET`: OAuth client secret
//!
//! Optional:
//! - `UMSYNC_UMAPI_BASE_URL`: Action endpoint base URL
//! - `UMSYNC_TEST_ONLY`: Validate without applying (true/false)
//! - `UMSYNC_TOKEN_ENDPOINT_URL`: IMS token endpoint
//! - `UMSYNC_SCOPES`: Comma-separated OAuth scopes
//! - `UMSYNC_CONNECT_TIMEOUT_MS`: Connect timeout in milliseconds
//! - `UMSYNC_SOCKET_TIMEOUT_MS`: Socket timeout in milliseconds
//! - `UMSYNC_PRODUCT_PROFILES`: Comma-separated product profiles
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./umsync.json` or `./umsync.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use umsync_domain::{Result, SyncError, UmapiConfig};

const CONFIG_FILE_NAMES: [&str; 4] = ["umsync.json", "umsync.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SyncError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<UmapiConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The three credential variables must be present; everything else falls
/// back to the defaults of [`UmapiConfig::new`].
///
/// # Errors
/// Returns `SyncError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<UmapiConfig> {
    let mut config = UmapiConfig::new(
        env_var("UMSYNC_ORGANIZATION_ID")?,
        env_var("UMSYNC_CLIENT_ID")?,
        env_var("UMSYNC_CLIENT_SECRET")?,
    );

    if let Ok(url) = std::env::var("UMSYNC_UMAPI_BASE_URL") {
        config.umapi_base_url = url;
    }
    if let Ok(url) = std::env::var("UMSYNC_TOKEN_ENDPOINT_URL") {
        config.ims_token_endpoint_url = url;
    }
    config.test_only = env_bool("UMSYNC_TEST_ONLY", false);
    if let Some(scopes) = env_list("UMSYNC_SCOPES") {
        config.scopes = scopes;
    }
    if let Some(profiles) = env_list("UMSYNC_PRODUCT_PROFILES") {
        config.product_profiles = profiles;
    }
    if let Some(ms) = env_u64("UMSYNC_CONNECT_TIMEOUT_MS")? {
        config.connect_timeout_ms = ms;
    }
    if let Some(ms) = env_u64("UMSYNC_SOCKET_TIMEOUT_MS")? {
        config.socket_timeout_ms = ms;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<UmapiConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SyncError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SyncError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SyncError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<UmapiConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the working directory, then the executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `SyncError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SyncError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    std::env::var(key)
        .ok()
        .map(|s| {
            s.trim().parse::<u64>().map_err(|e| SyncError::Config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}

/// Comma-separated list; blank entries are dropped.
fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|s| {
        s.split(',').map(str::trim).filter(|item| !item.is_empty()).map(str::to_string).collect()
    })
}
