//! `log` crate bridge
//!
//! reqwest and hyper report through the `log` facade; their records are
//! printed through our formatter under `LogTag::External` and obey the same
//! filters as first-party messages.

use super::core::log_internal;
use super::levels::LogLevel;
use super::tags::LogTag;

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        super::core::should_log(&LogTag::External, LogLevel::from_log(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("{}: {}", record.target(), record.args());
        log_internal(LogTag::External, LogLevel::from_log(record.level()), &message);
    }

    fn flush(&self) {
        super::file::flush_file_logging();
    }
}

/// Register the bridge as the global `log` logger
///
/// A logger can only be set once per process; later calls are ignored.
pub fn install() {
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}
