/// Market data: normalized records and the gateway that fetches them
///
/// - `types`: caller-facing record shapes
/// - `normalize`: provider shape to record, one function per operation
/// - `gateway`: cache, rate limiter and transport wired together
pub mod gateway;
pub mod normalize;
pub mod types;


pub use gateway::{GatewaySettings, MarketDataGateway, MIN_SEARCH_QUERY_CHARS};
pub use types::{
    CoinDetail, GlobalStats, HistoryInterval, HistorySeries, MarketCapPoint, MarketRecord,
    PricePoint, SearchHit, TrendingCoin, VolumePoint,
};
