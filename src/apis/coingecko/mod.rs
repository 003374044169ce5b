/// CoinGecko API endpoints
///
/// API Documentation: https://docs.coingecko.com/reference/introduction
///
/// Endpoints used:
/// 1. /coins/markets - Paginated market list ordered by market cap
/// 2. /coins/{id} - Coin detail with market data and description
/// 3. /coins/{id}/market_chart - Price, market cap and volume series
/// 4. /search - Coins matching a partial name or symbol
/// 5. /search/trending - Currently trending coins
/// 6. /global - Aggregate market totals
///
/// This module only knows paths, query parameters and response shapes;
/// pacing and caching belong to the gateway.
pub mod types;

pub use self::types::{
    CoinGeckoCoinDetail, CoinGeckoGlobalResponse, CoinGeckoMarketChart, CoinGeckoMarketCoin,
    CoinGeckoSearchResponse, CoinGeckoTrendingResponse,
};

use crate::market_data::types::HistoryInterval;

// ============================================================================
// API CONFIGURATION
// ============================================================================

pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Search responses are cut to this many coins
pub const SEARCH_RESULT_LIMIT: usize = 10;

pub const MARKETS_PATH: &str = "coins/markets";
pub const SEARCH_PATH: &str = "search";
pub const TRENDING_PATH: &str = "search/trending";
pub const GLOBAL_PATH: &str = "global";

pub type Query = Vec<(&'static str, String)>;

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Percent-encode a coin id for use as a path segment
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

pub fn markets_query(vs_currency: &str, page: u32, per_page: u32) -> Query {
    vec![
        ("vs_currency", vs_currency.to_string()),
        ("order", "market_cap_desc".to_string()),
        ("per_page", per_page.to_string()),
        ("page", page.to_string()),
        ("sparkline", "false".to_string()),
        ("price_change_percentage", "1h,24h,7d".to_string()),
    ]
}

pub fn coin_path(coin_id: &str) -> String {
    format!("coins/{}", encode_segment(coin_id))
}

pub fn coin_query() -> Query {
    vec![
        ("localization", "false".to_string()),
        ("tickers", "false".to_string()),
        ("market_data", "true".to_string()),
        ("community_data", "false".to_string()),
        ("developer_data", "false".to_string()),
        ("sparkline", "false".to_string()),
    ]
}

pub fn market_chart_path(coin_id: &str) -> String {
    format!("coins/{}/market_chart", encode_segment(coin_id))
}

pub fn market_chart_query(vs_currency: &str, days: u32, interval: HistoryInterval) -> Query {
    vec![
        ("vs_currency", vs_currency.to_string()),
        ("days", days.to_string()),
        ("interval", interval.as_str().to_string()),
    ]
}

pub fn search_query(query: &str) -> Query {
    vec![("query", query.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markets_query_requests_change_windows() {
        let query = markets_query("usd", 3, 100);
        assert!(query.contains(&("page", "3".to_string())));
        assert!(query.contains(&("per_page", "100".to_string())));
        assert!(query.contains(&("order", "market_cap_desc".to_string())));
        assert!(query.contains(&("price_change_percentage", "1h,24h,7d".to_string())));
    }

    #[test]
    fn coin_ids_are_encoded_in_paths() {
        assert_eq!(coin_path("bitcoin"), "coins/bitcoin");
        assert_eq!(market_chart_path("a/b"), "coins/a%2Fb/market_chart");
    }

    #[test]
    fn market_chart_query_passes_interval_through() {
        let query = market_chart_query("eur", 30, HistoryInterval::Daily);
        assert_eq!(
            query,
            vec![
                ("vs_currency", "eur".to_string()),
                ("days", "30".to_string()),
                ("interval", "daily".to_string()),
            ]
        );
    }
}
