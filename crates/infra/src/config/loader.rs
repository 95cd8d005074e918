//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. Only if `HASHAPI_BASE_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. Uses built-in defaults when no source is found
//!
//! ## Environment Variables
//! - `HASHAPI_BASE_URL`: API origin plus version prefix (required for env mode)
//! - `HASHAPI_TIMEOUT_SECS`: Transport timeout in seconds
//! - `HASHAPI_USER_AGENT`: User-Agent header value
//! - `HASHAPI_ACCESS_TOKEN`: Pre-issued access token
//! - `HASHAPI_REFRESH_TOKEN`: Pre-issued refresh token
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./hashapi.json` or `./hashapi.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use hashapi_domain::{ClientConfig, HashApiError, Result};

/// Load configuration with automatic fallback strategy
///
/// Environment variables win whenever `HASHAPI_BASE_URL` is set; only its
/// absence falls back to a config file, then to defaults.
///
/// # Errors
/// Returns `HashApiError::Config` if a source exists but is invalid.
pub fn load() -> Result<ClientConfig> {
    if std::env::var_os("HASHAPI_BASE_URL").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!("HASHAPI_BASE_URL not set, trying file");
    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(ClientConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `HASHAPI_BASE_URL` must be present; the other variables are optional.
///
/// # Errors
/// Returns `HashApiError::Config` if the base URL is missing or the timeout
/// is not a number.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = env_var("HASHAPI_BASE_URL")?;
    let timeout_secs = match std::env::var("HASHAPI_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| HashApiError::Config(format!("Invalid timeout: {}", e)))?,
        Err(_) => ClientConfig::default().timeout_secs,
    };

    Ok(ClientConfig {
        base_url,
        timeout_secs,
        user_agent: env_opt("HASHAPI_USER_AGENT"),
        access_token: env_opt("HASHAPI_ACCESS_TOKEN"),
        refresh_token: env_opt("HASHAPI_REFRESH_TOKEN"),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `HashApiError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HashApiError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HashApiError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HashApiError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HashApiError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HashApiError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(HashApiError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["hashapi.json", "hashapi.toml", "config.json", "config.toml"];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        HashApiError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; empty values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: [&str; 5] = [
        "HASHAPI_BASE_URL",
        "HASHAPI_TIMEOUT_SECS",
        "HASHAPI_USER_AGENT",
        "HASHAPI_ACCESS_TOKEN",
        "HASHAPI_REFRESH_TOKEN",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HASHAPI_BASE_URL", "http://localhost:8080/v1");
        std::env::set_var("HASHAPI_TIMEOUT_SECS", "5");
        std::env::set_var("HASHAPI_USER_AGENT", "hashapi-tests");
        std::env::set_var("HASHAPI_ACCESS_TOKEN", "a1");
        std::env::set_var("HASHAPI_REFRESH_TOKEN", "r1");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent.as_deref(), Some("hashapi-tests"));
        assert_eq!(config.access_token.as_deref(), Some("a1"));
        assert_eq!(config.refresh_token.as_deref(), Some("r1"));

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, HashApiError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HASHAPI_BASE_URL", "http://localhost:8080/v1");
        std::env::set_var("HASHAPI_TIMEOUT_SECS", "soon");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, HashApiError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_propagates_invalid_env_config() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HASHAPI_BASE_URL", "http://localhost:8080/v1");
        std::env::set_var("HASHAPI_TIMEOUT_SECS", "soon");

        let err = load().unwrap_err();
        assert!(matches!(err, HashApiError::Config(msg) if msg.contains("timeout")));

        clear_env();
    }

    #[test]
    fn test_load_prefers_env_when_base_url_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HASHAPI_BASE_URL", "http://localhost:8080/v1");

        let config = load().unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");

        clear_env();
    }

    #[test]
    fn test_empty_token_var_is_unset() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HASHAPI_BASE_URL", "http://localhost:8080/v1");
        std::env::set_var("HASHAPI_ACCESS_TOKEN", "  ");

        let config = load_from_env().unwrap();
        assert!(config.access_token.is_none());
        assert_eq!(config.timeout_secs, 30);

        clear_env();
    }

    #[test]
    fn test_parse_config_toml() {
        let config = parse_config(
            "base_url = \"https://staging.example/v1\"\ntimeout_secs = 10\n",
            Path::new("hashapi.toml"),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://staging.example/v1");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_parse_config_unsupported_extension() {
        let err = parse_config("base_url: x", Path::new("hashapi.yaml")).unwrap_err();
        assert!(matches!(err, HashApiError::Config(msg) if msg.contains("yaml")));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_from_file(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, HashApiError::Config(msg) if msg.contains("JSON")));
    }

    #[test]
    fn test_load_from_file_missing_path() {
        let err = load_from_file(Some(PathBuf::from("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, HashApiError::Config(msg) if msg.contains("not found")));
    }
}
