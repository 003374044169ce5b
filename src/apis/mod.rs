/// External market data API plumbing
pub mod client;
pub mod coingecko;
pub mod stats;

pub use client::{HttpTransport, RateLimiter, Transport, TransportResponse};
pub use stats::{ApiStats, ApiStatsTracker};
