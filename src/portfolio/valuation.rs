/// Portfolio valuation against current market prices
use super::types::Holding;
use crate::market_data::MarketRecord;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub price: f64,
    pub change_24h: Option<f64>,
}

/// Symbol to current price lookup
///
/// Built from a market list; when two coins share a symbol the first one
/// (the larger market cap) wins.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    quotes: HashMap<String, PriceQuote>,
}

impl PriceBook {
    pub fn from_market(records: &[MarketRecord]) -> Self {
        let mut quotes = HashMap::new();
        for record in records {
            let Some(price) = record.current_price else {
                continue;
            };
            if record.symbol.is_empty() {
                continue;
            }
            quotes
                .entry(record.symbol.to_uppercase())
                .or_insert(PriceQuote {
                    price,
                    change_24h: record.price_change_percentage_24h,
                });
        }
        Self { quotes }
    }

    pub fn insert(&mut self, symbol: &str, quote: PriceQuote) {
        self.quotes.insert(symbol.to_uppercase(), quote);
    }

    pub fn quote(&self, symbol: &str) -> Option<&PriceQuote> {
        self.quotes.get(&symbol.to_uppercase())
    }

    /// Current price, 0 when the symbol is unknown
    pub fn price(&self, symbol: &str) -> f64 {
        self.quote(symbol).map(|quote| quote.price).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

pub fn holding_value(holding: &Holding, prices: &PriceBook) -> f64 {
    holding.amount * prices.price(&holding.symbol)
}

pub fn profit_loss(holding: &Holding, prices: &PriceBook) -> f64 {
    holding_value(holding, prices) - holding.purchase_value()
}

pub fn profit_loss_percent(holding: &Holding, prices: &PriceBook) -> f64 {
    let purchase_value = holding.purchase_value();
    if purchase_value > 0.0 {
        profit_loss(holding, prices) / purchase_value * 100.0
    } else {
        0.0
    }
}

/// One holding priced against the book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingValuation {
    pub holding: Holding,
    pub current_price: f64,
    pub change_24h: Option<f64>,
    pub value: f64,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
}

impl HoldingValuation {
    pub fn new(holding: &Holding, prices: &PriceBook) -> Self {
        let quote = prices.quote(&holding.symbol);
        Self {
            holding: holding.clone(),
            current_price: quote.map(|q| q.price).unwrap_or(0.0),
            change_24h: quote.and_then(|q| q.change_24h),
            value: holding_value(holding, prices),
            profit_loss: profit_loss(holding, prices),
            profit_loss_percent: profit_loss_percent(holding, prices),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_profit_loss: f64,
    /// Relative to total cost; 0 when nothing was paid
    pub total_profit_loss_percent: f64,
}

impl PortfolioSummary {
    pub fn calculate(holdings: &[Holding], prices: &PriceBook) -> Self {
        let total_value: f64 = holdings.iter().map(|h| holding_value(h, prices)).sum();
        let total_cost: f64 = holdings.iter().map(Holding::purchase_value).sum();
        let total_profit_loss: f64 = holdings.iter().map(|h| profit_loss(h, prices)).sum();

        let total_profit_loss_percent = if total_cost > 0.0 {
            total_profit_loss / total_cost * 100.0
        } else {
            0.0
        };

        Self {
            total_value,
            total_cost,
            total_profit_loss,
            total_profit_loss_percent,
        }
    }
}
