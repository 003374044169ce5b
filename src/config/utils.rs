use super::schemas::Config;
/// Configuration utilities - loading, reloading, and access helpers
///
/// - Loading configuration from disk (TOML)
/// - Thread-safe access helpers
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::RwLock;

use crate::logger::{self, LogTag};

/// Global configuration instance
///
/// Access it using the helper functions below. Code that runs before
/// `load_config` sees `Config::default()`.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Parse a configuration file without touching the global instance
///
/// A missing file yields the defaults; a present but unreadable or invalid
/// file is an error.
pub fn read_config_file(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    let config = toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

    config.validate()?;
    Ok(config)
}

/// Load configuration from disk and initialize the global CONFIG
///
/// Should be called once at startup. If the file doesn't exist the defaults
/// from the schema definitions are used.
pub fn load_config_from_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
    }

    let config = read_config_file(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    logger::debug(
        LogTag::Config,
        &format!("Configuration loaded from '{}'", path.display()),
    );
    Ok(())
}

/// Run a closure against the current configuration
///
/// # Example
/// ```
/// use coinfolio::config::with_config;
///
/// let ttl = with_config(|cfg| cfg.gateway.cache_ttl_secs);
/// assert!(ttl > 0);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => match lock.read() {
            Ok(config) => f(&config),
            Err(poisoned) => f(&poisoned.into_inner()),
        },
        None => f(&Config::default()),
    }
}

/// Get a clone of the entire configuration
///
/// Useful when config values need to be held across await points.
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = read_config_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\nbase_url = ").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(err.contains("Failed to parse config file"));
        assert!(err.contains("config.toml"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            concat!(
                "[gateway]\nmin_request_interval_ms = 2500\n\n",
                "[portfolio]\nholdings_path = \"/tmp/h.json\"\n",
            ),
        )
        .unwrap();

        let cfg = read_config_file(&path).unwrap();
        assert_eq!(cfg.gateway.min_request_interval_ms, 2500);
        assert_eq!(cfg.portfolio.holdings_path, "/tmp/h.json");
        assert_eq!(cfg.gateway.cache_ttl_secs, 300);
    }
}
