/// Level and tag filtering in front of the formatter
use super::config::{get_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Whether a message at `level` for `tag` passes the current filters
///
/// Errors always pass. Verbose output needs `--verbose` or a per-tag
/// verbose entry; debug output needs the tag in the debug set. Everything
/// else is cut by the minimum level and the optional tag allow-list.
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    passes(&get_logger_config(), tag, level)
}

fn passes(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    let key = tag.to_debug_key();

    match level {
        LogLevel::Error => true,
        LogLevel::Verbose => {
            config.min_level == LogLevel::Verbose || config.verbose_tags.contains(&key)
        }
        LogLevel::Debug => {
            level <= config.min_level
                && (config.debug_tags.contains("all") || config.debug_tags.contains(&key))
        }
        LogLevel::Warning | LogLevel::Info => {
            level <= config.min_level
                && (config.enabled_tags.is_empty() || config.enabled_tags.contains(&key))
        }
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if should_log(&tag, level) {
        super::format::format_and_log(tag, level, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_ignore_every_filter() {
        let mut config = LoggerConfig::default();
        config.min_level = LogLevel::Error;
        config.enabled_tags.insert("portfolio".to_string());
        assert!(passes(&config, &LogTag::Api, LogLevel::Error));
        assert!(!passes(&config, &LogTag::Api, LogLevel::Warning));
    }

    #[test]
    fn debug_needs_the_tag() {
        let config = LoggerConfig::from_flags(false, &["cache".to_string()]);
        assert!(passes(&config, &LogTag::Cache, LogLevel::Debug));
        assert!(!passes(&config, &LogTag::Api, LogLevel::Debug));

        let all = LoggerConfig::from_flags(false, &["all".to_string()]);
        assert!(passes(&all, &LogTag::RateLimit, LogLevel::Debug));
    }

    #[test]
    fn verbose_per_tag_works_at_info_level() {
        let mut config = LoggerConfig::default();
        assert!(!passes(&config, &LogTag::Api, LogLevel::Verbose));
        config.verbose_tags.insert("api".to_string());
        assert!(passes(&config, &LogTag::Api, LogLevel::Verbose));
    }

    #[test]
    fn allow_list_limits_info() {
        let mut config = LoggerConfig::default();
        config.enabled_tags.insert("portfolio".to_string());
        assert!(passes(&config, &LogTag::Portfolio, LogLevel::Info));
        assert!(!passes(&config, &LogTag::Cache, LogLevel::Info));
    }
}
