/// Raw CoinGecko v3 response shapes
///
/// Everything the provider may omit or null out is an `Option`; only the
/// identifiers a record is useless without are required.
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Element of `/coins/markets`
#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoMarketCoin {
    pub id: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_1h_in_currency: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d_in_currency: Option<f64>,
    pub total_volume: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}

/// `/coins/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoCoinDetail {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub image: Option<CoinGeckoImage>,
    pub market_cap_rank: Option<u32>,
    pub market_data: Option<CoinGeckoCoinMarketData>,
    pub description: Option<HashMap<String, Option<String>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoImage {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

/// Per-currency maps are keyed by lower-case quote currency ("usd", "eur", ...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoCoinMarketData {
    pub current_price: Option<HashMap<String, Option<f64>>>,
    pub market_cap: Option<HashMap<String, Option<f64>>>,
    pub total_volume: Option<HashMap<String, Option<f64>>>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub price_change_percentage_30d: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}

/// `/coins/{id}/market_chart`: each point is `[unix_millis, value]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoMarketChart {
    pub prices: Option<Vec<(f64, Option<f64>)>>,
    pub market_caps: Option<Vec<(f64, Option<f64>)>>,
    pub total_volumes: Option<Vec<(f64, Option<f64>)>>,
}

/// `/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoSearchResponse {
    pub coins: Option<Vec<CoinGeckoSearchCoin>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoSearchCoin {
    pub id: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub thumb: Option<String>,
    pub market_cap_rank: Option<u32>,
}

/// `/search/trending`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoTrendingResponse {
    pub coins: Option<Vec<CoinGeckoTrendingEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoTrendingEntry {
    pub item: CoinGeckoTrendingItem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoTrendingItem {
    pub id: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub thumb: Option<String>,
    pub market_cap_rank: Option<u32>,
    pub price_btc: Option<f64>,
}

/// `/global`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoGlobalResponse {
    pub data: Option<CoinGeckoGlobalData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinGeckoGlobalData {
    pub active_cryptocurrencies: Option<u64>,
    pub markets: Option<u64>,
    pub total_market_cap: Option<HashMap<String, f64>>,
    pub total_volume: Option<HashMap<String, f64>>,
    pub market_cap_percentage: Option<BTreeMap<String, f64>>,
    pub market_cap_change_percentage_24h_usd: Option<f64>,
}
