/// Deterministic cache keys
///
/// A key is derived only from the operation and its normalized parameters,
/// so the same logical query always maps to the same key.
use crate::market_data::types::HistoryInterval;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn market_list(page: u32, per_page: u32) -> Self {
        Self(format!("market_data_{}_{}", page, per_page))
    }

    pub fn coin(coin_id: &str) -> Self {
        Self(format!("coin_{}", coin_id))
    }

    pub fn history(coin_id: &str, days: u32, interval: HistoryInterval) -> Self {
        Self(format!("history_{}_{}_{}", coin_id, days, interval.as_str()))
    }

    /// Search terms are case-insensitive
    pub fn search(query: &str) -> Self {
        Self(format!("search_{}", query.to_lowercase()))
    }

    pub fn trending() -> Self {
        Self("trending_coins".to_string())
    }

    pub fn global() -> Self {
        Self("global_data".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
