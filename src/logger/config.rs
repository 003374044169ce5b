/// Logger configuration and the global instance the filters read from
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped (Error always passes)
    pub min_level: LogLevel,
    /// Tags with debug output enabled (see `LogTag::to_debug_key`)
    pub debug_tags: HashSet<String>,
    /// Tags with verbose output enabled even when min_level is lower
    pub verbose_tags: HashSet<String>,
    /// When non-empty, only these tags are printed
    pub enabled_tags: HashSet<String>,
    /// Optional log file
    pub file_path: Option<PathBuf>,
    pub show_date: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            file_path: None,
            show_date: false,
        }
    }
}

impl LoggerConfig {
    /// Build from command-line style inputs
    ///
    /// `debug_tags` accepts tag keys; `all` enables debug for every tag.
    /// Unknown keys are kept so they can be reported by the caller.
    pub fn from_flags(verbose: bool, debug_tags: &[String]) -> Self {
        let mut config = Self::default();

        if !debug_tags.is_empty() {
            config.min_level = LogLevel::Debug;
        }
        if verbose {
            config.min_level = LogLevel::Verbose;
        }

        for key in debug_tags {
            let key = match LogTag::from_debug_key(key) {
                Some(tag) => tag.to_debug_key(),
                None => key.trim().to_lowercase(),
            };
            config.debug_tags.insert(key);
        }

        config
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flags_raises_level_for_debug_tags() {
        let config = LoggerConfig::from_flags(false, &["API".to_string()]);
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.debug_tags.contains("api"));
    }

    #[test]
    fn tag_aliases_are_canonicalized() {
        let config = LoggerConfig::from_flags(false, &["rate_limit".to_string()]);
        assert!(config.debug_tags.contains("ratelimit"));
    }

    #[test]
    fn verbose_wins_over_debug() {
        let config = LoggerConfig::from_flags(true, &["cache".to_string()]);
        assert_eq!(config.min_level, LogLevel::Verbose);
    }

    #[test]
    fn no_flags_means_info() {
        let config = LoggerConfig::from_flags(false, &[]);
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.debug_tags.is_empty());
    }
}
