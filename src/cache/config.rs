/// Cache configuration
///
/// The response cache is unbounded: distinct keys accumulate until cleared.
/// Only the freshness window is configurable.
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Entries at least this old are treated as absent
    pub ttl: Duration,
}

/// Market data responses (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

impl CacheConfig {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
