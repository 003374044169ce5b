/// Log tags identify the subsystem a message comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Api,
    Cache,
    RateLimit,
    Portfolio,
    Config,
    /// Records forwarded from dependency crates through the `log` bridge
    External,
}

impl LogTag {
    /// Key used by `--debug <key>` and the enabled-tags filter
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system",
            LogTag::Api => "api",
            LogTag::Cache => "cache",
            LogTag::RateLimit => "ratelimit",
            LogTag::Portfolio => "portfolio",
            LogTag::Config => "config",
            LogTag::External => "external",
        }
        .to_string()
    }

    /// Uncolored label used in the log file
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Api => "API",
            LogTag::Cache => "CACHE",
            LogTag::RateLimit => "RATELIMIT",
            LogTag::Portfolio => "PORTFOLIO",
            LogTag::Config => "CONFIG",
            LogTag::External => "EXTERNAL",
        }
    }

    pub fn from_debug_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "system" => Some(LogTag::System),
            "api" => Some(LogTag::Api),
            "cache" => Some(LogTag::Cache),
            "ratelimit" | "rate-limit" | "rate_limit" => Some(LogTag::RateLimit),
            "portfolio" => Some(LogTag::Portfolio),
            "config" => Some(LogTag::Config),
            "external" => Some(LogTag::External),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_keys_round_trip() {
        for tag in [
            LogTag::System,
            LogTag::Api,
            LogTag::Cache,
            LogTag::RateLimit,
            LogTag::Portfolio,
            LogTag::Config,
            LogTag::External,
        ] {
            assert_eq!(LogTag::from_debug_key(&tag.to_debug_key()), Some(tag));
        }
        assert_eq!(LogTag::from_debug_key("rate-limit"), Some(LogTag::RateLimit));
    }
}
