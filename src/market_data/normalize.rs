/// Translation boundary between CoinGecko shapes and normalized records
///
/// One function per gateway operation. Provider schema drift only touches
/// this file. Missing optional data becomes `None` or an empty sequence;
/// a missing required container is reported as `Err` with a reason.
use crate::apis::coingecko::types::{
    CoinGeckoCoinDetail, CoinGeckoGlobalResponse, CoinGeckoMarketChart, CoinGeckoMarketCoin,
    CoinGeckoSearchResponse, CoinGeckoTrendingResponse,
};
use crate::apis::coingecko::SEARCH_RESULT_LIMIT;
use crate::market_data::types::{
    CoinDetail, GlobalStats, HistorySeries, MarketCapPoint, MarketRecord, PricePoint, SearchHit,
    TrendingCoin, VolumePoint,
};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

fn upper(symbol: Option<String>) -> String {
    symbol.map(|s| s.to_uppercase()).unwrap_or_default()
}

fn quoted(map: &Option<HashMap<String, Option<f64>>>, vs_currency: &str) -> Option<f64> {
    map.as_ref()?.get(vs_currency).copied().flatten()
}

fn millis_to_utc(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Points with an unusable timestamp or a null value are skipped
fn points<P>(
    raw: Option<Vec<(f64, Option<f64>)>>,
    build: impl Fn(DateTime<Utc>, f64) -> P,
) -> Vec<P> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|(millis, value)| Some(build(millis_to_utc(millis)?, value?)))
        .collect()
}

pub fn market_list(raw: Vec<CoinGeckoMarketCoin>) -> Vec<MarketRecord> {
    raw.into_iter()
        .map(|coin| MarketRecord {
            id: coin.id,
            symbol: upper(coin.symbol),
            name: coin.name.unwrap_or_default(),
            image: coin.image,
            current_price: coin.current_price,
            market_cap: coin.market_cap,
            market_cap_rank: coin.market_cap_rank,
            price_change_percentage_1h: coin.price_change_percentage_1h_in_currency,
            price_change_percentage_24h: coin.price_change_percentage_24h,
            price_change_percentage_7d: coin.price_change_percentage_7d_in_currency,
            total_volume: coin.total_volume,
            circulating_supply: coin.circulating_supply,
            total_supply: coin.total_supply,
            max_supply: coin.max_supply,
        })
        .collect()
}

/// `None` when the payload carries no identifier (an empty result)
pub fn coin_detail(raw: CoinGeckoCoinDetail, vs_currency: &str) -> Option<CoinDetail> {
    let id = raw.id.filter(|id| !id.trim().is_empty())?;
    let market = raw.market_data.unwrap_or_default();
    let image = raw
        .image
        .and_then(|image| image.large.or(image.small));
    let description = raw
        .description
        .and_then(|mut texts| texts.remove("en").flatten())
        .filter(|text| !text.trim().is_empty());

    Some(CoinDetail {
        id,
        symbol: upper(raw.symbol),
        name: raw.name.unwrap_or_default(),
        image,
        current_price: quoted(&market.current_price, vs_currency),
        market_cap: quoted(&market.market_cap, vs_currency),
        market_cap_rank: raw.market_cap_rank,
        price_change_percentage_24h: market.price_change_percentage_24h,
        price_change_percentage_7d: market.price_change_percentage_7d,
        price_change_percentage_30d: market.price_change_percentage_30d,
        total_volume: quoted(&market.total_volume, vs_currency),
        circulating_supply: market.circulating_supply,
        total_supply: market.total_supply,
        max_supply: market.max_supply,
        description,
    })
}

pub fn history(raw: CoinGeckoMarketChart) -> HistorySeries {
    HistorySeries {
        prices: points(raw.prices, |timestamp, price| PricePoint { timestamp, price }),
        market_caps: points(raw.market_caps, |timestamp, market_cap| MarketCapPoint {
            timestamp,
            market_cap,
        }),
        total_volumes: points(raw.total_volumes, |timestamp, volume| VolumePoint {
            timestamp,
            volume,
        }),
    }
}

pub fn search(raw: CoinGeckoSearchResponse) -> Result<Vec<SearchHit>, String> {
    let coins = raw
        .coins
        .ok_or_else(|| "response has no 'coins' array".to_string())?;

    Ok(coins
        .into_iter()
        .take(SEARCH_RESULT_LIMIT)
        .map(|coin| SearchHit {
            id: coin.id,
            name: coin.name.unwrap_or_default(),
            symbol: upper(coin.symbol),
            thumb: coin.thumb,
            market_cap_rank: coin.market_cap_rank,
        })
        .collect())
}

pub fn trending(raw: CoinGeckoTrendingResponse) -> Result<Vec<TrendingCoin>, String> {
    let coins = raw
        .coins
        .ok_or_else(|| "response has no 'coins' array".to_string())?;

    Ok(coins
        .into_iter()
        .map(|entry| {
            let item = entry.item;
            TrendingCoin {
                id: item.id,
                name: item.name.unwrap_or_default(),
                symbol: upper(item.symbol),
                thumb: item.thumb,
                market_cap_rank: item.market_cap_rank,
                price_btc: item.price_btc,
            }
        })
        .collect())
}

pub fn global(raw: CoinGeckoGlobalResponse, vs_currency: &str) -> GlobalStats {
    let Some(data) = raw.data else {
        return GlobalStats::default();
    };

    GlobalStats {
        total_market_cap: data
            .total_market_cap
            .and_then(|totals| totals.get(vs_currency).copied()),
        total_volume: data
            .total_volume
            .and_then(|totals| totals.get(vs_currency).copied()),
        market_cap_percentage: data.market_cap_percentage.unwrap_or_default(),
        active_cryptocurrencies: data.active_cryptocurrencies,
        markets: data.markets,
        market_cap_change_percentage_24h_usd: data.market_cap_change_percentage_24h_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn market_list_preserves_documented_fields() {
        let raw: Vec<CoinGeckoMarketCoin> = parse(json!([{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.example/btc.png",
            "current_price": 64000.5,
            "market_cap": 1260000000000u64,
            "market_cap_rank": 1,
            "price_change_percentage_1h_in_currency": 0.12,
            "price_change_percentage_24h": -1.5,
            "price_change_percentage_7d_in_currency": 4.2,
            "total_volume": 35000000000u64,
            "circulating_supply": 19700000.0,
            "total_supply": 21000000.0,
            "max_supply": 21000000.0
        }]));

        let records = market_list(raw);
        assert_eq!(
            records,
            vec![MarketRecord {
                id: "bitcoin".to_string(),
                symbol: "BTC".to_string(),
                name: "Bitcoin".to_string(),
                image: Some("https://assets.example/btc.png".to_string()),
                current_price: Some(64000.5),
                market_cap: Some(1.26e12),
                market_cap_rank: Some(1),
                price_change_percentage_1h: Some(0.12),
                price_change_percentage_24h: Some(-1.5),
                price_change_percentage_7d: Some(4.2),
                total_volume: Some(3.5e10),
                circulating_supply: Some(19_700_000.0),
                total_supply: Some(21_000_000.0),
                max_supply: Some(21_000_000.0),
            }]
        );
    }

    #[test]
    fn market_list_marks_absent_fields_as_none() {
        let raw: Vec<CoinGeckoMarketCoin> = parse(json!([{
            "id": "newcoin",
            "symbol": "new",
            "name": "New Coin",
            "max_supply": null
        }]));

        let record = &market_list(raw)[0];
        assert_eq!(record.symbol, "NEW");
        assert_eq!(record.image, None);
        assert_eq!(record.current_price, None);
        assert_eq!(record.market_cap_rank, None);
        assert_eq!(record.price_change_percentage_1h, None);
        assert_eq!(record.max_supply, None);
    }

    #[test]
    fn coin_detail_reads_quote_currency_and_description() {
        let raw: CoinGeckoCoinDetail = parse(json!({
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "image": { "small": "s.png", "large": "l.png" },
            "market_cap_rank": 2,
            "description": { "en": "Smart contracts." },
            "market_data": {
                "current_price": { "usd": 3100.0, "eur": 2900.0 },
                "market_cap": { "usd": 370000000000.0 },
                "price_change_percentage_30d": 12.5
            }
        }));

        let detail = coin_detail(raw, "eur").unwrap();
        assert_eq!(detail.symbol, "ETH");
        assert_eq!(detail.image.as_deref(), Some("l.png"));
        assert_eq!(detail.current_price, Some(2900.0));
        assert_eq!(detail.market_cap, None);
        assert_eq!(detail.total_volume, None);
        assert_eq!(detail.price_change_percentage_30d, Some(12.5));
        assert_eq!(detail.description.as_deref(), Some("Smart contracts."));
    }

    #[test]
    fn coin_detail_tolerates_missing_market_data() {
        let raw: CoinGeckoCoinDetail = parse(json!({
            "id": "obscure",
            "symbol": "obs",
            "name": "Obscure",
            "image": { "small": "s.png" },
            "description": { "en": "" }
        }));

        let detail = coin_detail(raw, "usd").unwrap();
        assert_eq!(detail.image.as_deref(), Some("s.png"));
        assert_eq!(detail.current_price, None);
        assert_eq!(detail.description, None);
    }

    #[test]
    fn coin_detail_without_id_is_empty_result() {
        let raw: CoinGeckoCoinDetail = parse(json!({}));
        assert!(coin_detail(raw, "usd").is_none());
    }

    #[test]
    fn history_converts_millis_and_skips_nulls() {
        let raw: CoinGeckoMarketChart = parse(json!({
            "prices": [[1700000000000.0, 35000.0], [1700003600000.0, null]],
            "total_volumes": [[1700000000000.0, 1.5e10]]
        }));

        let series = history(raw);
        assert_eq!(series.prices.len(), 1);
        assert_eq!(series.prices[0].timestamp.timestamp(), 1_700_000_000);
        assert_eq!(series.prices[0].price, 35000.0);
        assert!(series.market_caps.is_empty());
        assert_eq!(series.total_volumes[0].volume, 1.5e10);
    }

    #[test]
    fn search_caps_results_and_requires_coins() {
        let coins: Vec<_> = (0..15)
            .map(|i| json!({ "id": format!("coin-{}", i), "name": "Coin", "symbol": "cn" }))
            .collect();
        let raw: CoinGeckoSearchResponse = parse(json!({ "coins": coins }));
        let hits = search(raw).unwrap();
        assert_eq!(hits.len(), SEARCH_RESULT_LIMIT);
        assert_eq!(hits[0].symbol, "CN");

        let malformed: CoinGeckoSearchResponse = parse(json!({ "exchanges": [] }));
        assert!(search(malformed).is_err());
    }

    #[test]
    fn trending_unwraps_items() {
        let raw: CoinGeckoTrendingResponse = parse(json!({
            "coins": [{ "item": {
                "id": "pepe", "name": "Pepe", "symbol": "pepe",
                "thumb": "t.png", "market_cap_rank": 30, "price_btc": 1.6e-10
            }}]
        }));

        let coins = trending(raw).unwrap();
        assert_eq!(coins[0].symbol, "PEPE");
        assert_eq!(coins[0].price_btc, Some(1.6e-10));
    }

    #[test]
    fn global_without_data_is_all_empty() {
        let raw: CoinGeckoGlobalResponse = parse(json!({}));
        assert_eq!(global(raw, "usd"), GlobalStats::default());
    }

    #[test]
    fn global_picks_quote_currency() {
        let raw: CoinGeckoGlobalResponse = parse(json!({ "data": {
            "active_cryptocurrencies": 14000,
            "markets": 1100,
            "total_market_cap": { "usd": 2.4e12, "btc": 3.7e7 },
            "total_volume": { "usd": 9.0e10 },
            "market_cap_percentage": { "btc": 52.1, "eth": 16.9 },
            "market_cap_change_percentage_24h_usd": -0.8
        }}));

        let stats = global(raw, "usd");
        assert_eq!(stats.total_market_cap, Some(2.4e12));
        assert_eq!(stats.total_volume, Some(9.0e10));
        assert_eq!(stats.market_cap_percentage.get("btc"), Some(&52.1));
        assert_eq!(stats.active_cryptocurrencies, Some(14000));
    }
}
