//! Centralized path resolution for coinfolio
//!
//! All data lives under one platform-specific base directory:
//! - **macOS**: `~/Library/Application Support/coinfolio/`
//! - **Windows**: `%LOCALAPPDATA%\coinfolio\`
//! - **Linux**: `$XDG_DATA_HOME/coinfolio/` (fallback `~/.local/share/coinfolio/`)
//!
//! ```text
//! coinfolio/
//! ├── config.toml
//! └── holdings.json
//! ```

use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "coinfolio";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

pub fn get_base_directory() -> &'static Path {
    BASE_DIRECTORY.as_path()
}

pub fn get_config_path() -> PathBuf {
    get_base_directory().join("config.toml")
}

pub fn get_holdings_path() -> PathBuf {
    get_base_directory().join("holdings.json")
}

/// Resolve a configured path, falling back to `default` when it is empty
pub fn resolve_configured(configured: &str, default: PathBuf) -> PathBuf {
    if configured.trim().is_empty() {
        default
    } else {
        PathBuf::from(configured)
    }
}

/// Create the base directory if needed
pub fn ensure_base_directory() -> std::io::Result<()> {
    std::fs::create_dir_all(get_base_directory())
}
