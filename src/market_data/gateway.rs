/// Market data gateway
///
/// Every public fetch follows the same path: validate arguments, serve a
/// fresh cache entry if there is one, otherwise wait for the rate limiter,
/// issue the call, check the status, decode, normalize, cache and return.
/// A failed call is returned to the caller and never cached.
use super::normalize;
use super::types::{
    CoinDetail, GlobalStats, HistoryInterval, HistorySeries, MarketRecord, SearchHit,
    TrendingCoin,
};
use crate::apis::client::{HttpTransport, RateLimiter, Transport, TransportResponse};
use crate::apis::coingecko::{
    self, CoinGeckoCoinDetail, CoinGeckoGlobalResponse, CoinGeckoMarketChart,
    CoinGeckoMarketCoin, CoinGeckoSearchResponse, CoinGeckoTrendingResponse,
};
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::cache::{CacheConfig, CacheKey, ResponseCache};
use crate::config::GatewayConfig;
use crate::errors::{GatewayError, GatewayResult};
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Queries shorter than this return no results without a lookup
pub const MIN_SEARCH_QUERY_CHARS: usize = 2;

/// Longest slice of an error body carried into a failure reason
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

const OP_MARKET_LIST: &str = "get_market_list";
const OP_COIN: &str = "get_coin";
const OP_HISTORY: &str = "get_history";
const OP_SEARCH: &str = "search";
const OP_TRENDING: &str = "get_trending";
const OP_GLOBAL: &str = "get_global_stats";

/// Tunables of a gateway instance
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub cache_ttl: Duration,
    pub min_request_interval: Duration,
    pub vs_currency: String,
}

impl GatewaySettings {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            min_request_interval: Duration::from_millis(config.min_request_interval_ms),
            vs_currency: config.vs_currency.to_lowercase(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self::from_config(&GatewayConfig::default())
    }
}

/// Cached, rate-limited access to the market data provider
///
/// Each instance owns its cache, limiter and counters; instances never
/// share state with one another.
pub struct MarketDataGateway<T: Transport = HttpTransport> {
    transport: T,
    cache: ResponseCache,
    rate_limiter: RateLimiter,
    stats: ApiStatsTracker,
    vs_currency: String,
}

impl MarketDataGateway<HttpTransport> {
    /// Gateway over HTTP using the given configuration section
    pub fn from_config(config: &GatewayConfig) -> Result<Self, String> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(transport, GatewaySettings::from_config(config)))
    }
}

impl<T: Transport> MarketDataGateway<T> {
    pub fn new(transport: T, settings: GatewaySettings) -> Self {
        Self {
            transport,
            cache: ResponseCache::new(CacheConfig::new(settings.cache_ttl)),
            rate_limiter: RateLimiter::new(settings.min_request_interval),
            stats: ApiStatsTracker::new(),
            vs_currency: settings.vs_currency,
        }
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Coins ordered by market cap, `page` is 1-based
    pub async fn get_market_list(
        &self,
        page: u32,
        page_size: u32,
    ) -> GatewayResult<Vec<MarketRecord>> {
        if page == 0 {
            return Err(GatewayError::invalid(OP_MARKET_LIST, "page starts at 1"));
        }
        if page_size == 0 {
            return Err(GatewayError::invalid(
                OP_MARKET_LIST,
                "page size must be greater than zero",
            ));
        }

        let key = CacheKey::market_list(page, page_size);
        if let Some(records) = self.lookup(&key) {
            return Ok(records);
        }

        let query = coingecko::markets_query(&self.vs_currency, page, page_size);
        let response = self
            .request(OP_MARKET_LIST, coingecko::MARKETS_PATH, &query, None)
            .await?;
        let raw: Vec<CoinGeckoMarketCoin> = decode(OP_MARKET_LIST, &response.body)?;
        let records = normalize::market_list(raw);

        self.store(key, &records);
        Ok(records)
    }

    /// Full detail for one coin
    pub async fn get_coin(&self, coin_id: &str) -> GatewayResult<CoinDetail> {
        let coin_id = coin_id.trim();
        if coin_id.is_empty() {
            return Err(GatewayError::invalid(OP_COIN, "coin id is empty"));
        }

        let key = CacheKey::coin(coin_id);
        if let Some(detail) = self.lookup(&key) {
            return Ok(detail);
        }

        let path = coingecko::coin_path(coin_id);
        let response = self
            .request(OP_COIN, &path, &coingecko::coin_query(), Some(coin_id))
            .await?;

        if response.body.trim().is_empty() {
            return Err(GatewayError::not_found(OP_COIN, coin_id));
        }
        let value: serde_json::Value = decode(OP_COIN, &response.body)?;
        if is_empty_payload(&value) {
            return Err(GatewayError::not_found(OP_COIN, coin_id));
        }
        let raw: CoinGeckoCoinDetail = serde_json::from_value(value).map_err(|e| {
            GatewayError::fetch_failed(OP_COIN, None, format!("invalid response body: {}", e))
        })?;
        let detail = normalize::coin_detail(raw, &self.vs_currency)
            .ok_or_else(|| GatewayError::not_found(OP_COIN, coin_id))?;

        self.store(key, &detail);
        Ok(detail)
    }

    /// Price, market cap and volume series over the last `days`
    ///
    /// `interval` is sent as given; callers derive it with
    /// [`HistoryInterval::for_days`].
    pub async fn get_history(
        &self,
        coin_id: &str,
        days: u32,
        interval: HistoryInterval,
    ) -> GatewayResult<HistorySeries> {
        let coin_id = coin_id.trim();
        if coin_id.is_empty() {
            return Err(GatewayError::invalid(OP_HISTORY, "coin id is empty"));
        }
        if days == 0 {
            return Err(GatewayError::invalid(
                OP_HISTORY,
                "days must be greater than zero",
            ));
        }

        let key = CacheKey::history(coin_id, days, interval);
        if let Some(series) = self.lookup(&key) {
            return Ok(series);
        }

        let path = coingecko::market_chart_path(coin_id);
        let query = coingecko::market_chart_query(&self.vs_currency, days, interval);
        let response = self
            .request(OP_HISTORY, &path, &query, Some(coin_id))
            .await?;
        let raw: CoinGeckoMarketChart = decode(OP_HISTORY, &response.body)?;
        let series = normalize::history(raw);

        self.store(key, &series);
        Ok(series)
    }

    /// Up to ten coins matching `query` by name or symbol
    pub async fn search(&self, query: &str) -> GatewayResult<Vec<SearchHit>> {
        if query.chars().count() < MIN_SEARCH_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let key = CacheKey::search(query);
        if let Some(hits) = self.lookup(&key) {
            return Ok(hits);
        }

        let response = self
            .request(
                OP_SEARCH,
                coingecko::SEARCH_PATH,
                &coingecko::search_query(query),
                None,
            )
            .await?;
        let raw: CoinGeckoSearchResponse = decode(OP_SEARCH, &response.body)?;
        let hits = normalize::search(raw)
            .map_err(|reason| GatewayError::fetch_failed(OP_SEARCH, None, reason))?;

        self.store(key, &hits);
        Ok(hits)
    }

    pub async fn get_trending(&self) -> GatewayResult<Vec<TrendingCoin>> {
        let key = CacheKey::trending();
        if let Some(coins) = self.lookup(&key) {
            return Ok(coins);
        }

        let response = self
            .request(OP_TRENDING, coingecko::TRENDING_PATH, &[], None)
            .await?;
        let raw: CoinGeckoTrendingResponse = decode(OP_TRENDING, &response.body)?;
        let coins = normalize::trending(raw)
            .map_err(|reason| GatewayError::fetch_failed(OP_TRENDING, None, reason))?;

        self.store(key, &coins);
        Ok(coins)
    }

    pub async fn get_global_stats(&self) -> GatewayResult<GlobalStats> {
        let key = CacheKey::global();
        if let Some(stats) = self.lookup(&key) {
            return Ok(stats);
        }

        let response = self
            .request(OP_GLOBAL, coingecko::GLOBAL_PATH, &[], None)
            .await?;
        let raw: CoinGeckoGlobalResponse = decode(OP_GLOBAL, &response.body)?;
        let stats = normalize::global(raw, &self.vs_currency);

        self.store(key, &stats);
        Ok(stats)
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        let count = self.cache.len();
        self.cache.clear();
        logger::info(
            LogTag::Cache,
            &format!("Cleared {} cached responses", count),
        );
    }

    /// Stored entries, including stale ones not yet looked up
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Request counters merged with the cache's lookup metrics
    pub fn stats(&self) -> ApiStats {
        let cache = self.cache.metrics();
        ApiStats {
            cache_hits: cache.hits,
            cache_misses: cache.misses,
            cache_expirations: cache.expirations,
            ..self.stats.get_stats()
        }
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn lookup<V: DeserializeOwned>(&self, key: &CacheKey) -> Option<V> {
        match self.cache.get(key) {
            Some(value) => {
                logger::debug(LogTag::Cache, &format!("Cache hit: {}", key));
                Some(value)
            }
            None => {
                logger::debug(LogTag::Cache, &format!("Cache miss: {}", key));
                None
            }
        }
    }

    fn store<V: Serialize>(&self, key: CacheKey, value: &V) {
        if let Err(e) = self.cache.insert(key, value) {
            logger::warning(LogTag::Cache, &e);
        }
    }

    /// Paced call with status classification
    ///
    /// With `not_found_id` set, HTTP 404 becomes `NotFound` for that id.
    async fn request(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&'static str, String)],
        not_found_id: Option<&str>,
    ) -> GatewayResult<TransportResponse> {
        let waited = self.rate_limiter.acquire().await;
        if !waited.is_zero() {
            logger::debug(
                LogTag::RateLimit,
                &format!("{} held back {}ms", operation, waited.as_millis()),
            );
        }

        logger::debug(LogTag::Api, &format!("GET {} ({})", path, operation));
        let started = Instant::now();
        let result = self.transport.get(path, query).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.stats.record_request(false, elapsed_ms);
                logger::warning(LogTag::Api, &format!("{} failed: {}", operation, e));
                return Err(e.into_gateway(operation));
            }
        };

        if response.is_success() {
            self.stats.record_request(true, elapsed_ms);
            logger::debug(
                LogTag::Api,
                &format!(
                    "{} answered {} in {:.0}ms",
                    path, response.status, elapsed_ms
                ),
            );
            return Ok(response);
        }

        self.stats.record_request(false, elapsed_ms);
        if response.status == 404 {
            if let Some(id) = not_found_id {
                logger::debug(LogTag::Api, &format!("{}: '{}' not found", operation, id));
                return Err(GatewayError::not_found(operation, id));
            }
        }

        logger::warning(
            LogTag::Api,
            &format!("{} returned HTTP {}", operation, response.status),
        );
        Err(GatewayError::fetch_failed(
            operation,
            Some(response.status),
            error_reason(&response.body),
        ))
    }
}

fn decode<R: DeserializeOwned>(operation: &'static str, body: &str) -> GatewayResult<R> {
    serde_json::from_str(body).map_err(|e| {
        GatewayError::fetch_failed(operation, None, format!("invalid response body: {}", e))
    })
}

fn is_empty_payload(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn error_reason(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "unexpected status".to_string();
    }
    let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}
