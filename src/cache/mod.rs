/// Response cache for the market data gateway
///
/// - `config`: freshness window
/// - `keys`: deterministic key derivation per operation
/// - `manager`: the expire-on-read store
pub mod config;
pub mod keys;
pub mod manager;

pub use config::CacheConfig;
pub use keys::CacheKey;
pub use manager::{CacheMetrics, ResponseCache};
