//! Tagged, levelled logging for coinfolio
//!
//! Every message carries a [`LogTag`] naming the subsystem and a level.
//! Debug output is opt-in per tag (`--debug cache`), verbose output needs
//! `--verbose`. Console lines are coloured; a file sink is optional.
//!
//! ```rust
//! use coinfolio::logger::{self, LogTag, LoggerConfig};
//!
//! logger::init(LoggerConfig::from_flags(false, &["cache".to_string()]));
//! logger::info(LogTag::System, "Gateway ready");
//! logger::debug(LogTag::Cache, "Cache hit: coin_bitcoin");
//! ```

mod bridge;
mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Installs the configuration, opens the log file when one is configured and
/// registers the `log` crate bridge. Safe to call more than once; later calls
/// only replace the configuration.
pub fn init(config: LoggerConfig) {
    let file_path = config.file_path.clone();
    set_logger_config(config);

    if let Some(path) = file_path {
        file::init_file_logging(&path);
    }

    bridge::install();
}

pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Printed only when the tag was enabled with `--debug`
///
/// ```rust
/// use coinfolio::logger::{self, LogTag};
///
/// logger::debug(LogTag::RateLimit, "get_coin held back 640ms");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Printed only with `--verbose`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush the file sink; call before exiting
pub fn flush() {
    file::flush_file_logging();
}
