/// Normalized market data records
///
/// These shapes are what callers see. They never mirror provider field
/// names one-to-one; `None` marks data the provider did not supply.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One row of the market list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub id: String,
    /// Upper-cased ticker, empty when the provider omitted it
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_1h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub total_volume: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub price_change_percentage_30d: Option<f64>,
    pub total_volume: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketCapPoint {
    pub timestamp: DateTime<Utc>,
    pub market_cap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub timestamp: DateTime<Utc>,
    pub volume: f64,
}

/// Time series in provider order (oldest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub prices: Vec<PricePoint>,
    pub market_caps: Vec<MarketCapPoint>,
    pub total_volumes: Vec<VolumePoint>,
}

impl HistorySeries {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty() && self.market_caps.is_empty() && self.total_volumes.is_empty()
    }

    /// Percent change between the first and last price, if computable
    pub fn price_change_percent(&self) -> Option<f64> {
        let first = self.prices.first()?.price;
        let last = self.prices.last()?.price;
        if first == 0.0 {
            None
        } else {
            Some((last - first) / first * 100.0)
        }
    }
}

/// Granularity of a history request
///
/// The provider expects `Hourly` for a one-day window and `Daily` otherwise;
/// `for_days` encodes that rule. The gateway passes whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryInterval {
    Hourly,
    Daily,
}

impl HistoryInterval {
    pub fn for_days(days: u32) -> Self {
        if days == 1 {
            HistoryInterval::Hourly
        } else {
            HistoryInterval::Daily
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryInterval::Hourly => "hourly",
            HistoryInterval::Daily => "daily",
        }
    }
}

impl fmt::Display for HistoryInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub thumb: Option<String>,
    pub market_cap_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub thumb: Option<String>,
    pub market_cap_rank: Option<u32>,
    pub price_btc: Option<f64>,
}

/// Aggregate market totals, amounts in the gateway's quote currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    /// Dominance by lower-case symbol, in percent
    pub market_cap_percentage: BTreeMap<String, f64>,
    pub active_cryptocurrencies: Option<u64>,
    pub markets: Option<u64>,
    pub market_cap_change_percentage_24h_usd: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn interval_rule_for_days() {
        assert_eq!(HistoryInterval::for_days(1), HistoryInterval::Hourly);
        assert_eq!(HistoryInterval::for_days(7), HistoryInterval::Daily);
        assert_eq!(HistoryInterval::for_days(365), HistoryInterval::Daily);
    }

    #[test]
    fn interval_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HistoryInterval::Hourly).unwrap(),
            "\"hourly\""
        );
    }

    #[test]
    fn price_change_over_series() {
        let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();
        let series = HistorySeries {
            prices: vec![
                PricePoint {
                    timestamp: at(0),
                    price: 100.0,
                },
                PricePoint {
                    timestamp: at(3600),
                    price: 110.0,
                },
            ],
            ..Default::default()
        };
        let change = series.price_change_percent().unwrap();
        assert!((change - 10.0).abs() < 1e-9);
        assert!(HistorySeries::default().price_change_percent().is_none());
    }
}
