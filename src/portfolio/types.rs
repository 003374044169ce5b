use crate::errors::{PortfolioError, PortfolioResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded position: how much of a coin was bought and at what price
///
/// Stored in camelCase so existing holdings files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Creation time in unix millis, bumped when needed to stay unique
    pub id: u64,
    /// Upper-cased ticker, matched against market list symbols
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub purchase_price: f64,
    pub date_added: DateTime<Utc>,
}

impl Holding {
    pub fn purchase_value(&self) -> f64 {
        self.amount * self.purchase_price
    }

    /// Case-insensitive substring match on symbol or name
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.symbol.to_lowercase().contains(&term) || self.name.to_lowercase().contains(&term)
    }
}

/// User input for adding or editing a holding
#[derive(Debug, Clone, PartialEq)]
pub struct NewHolding {
    pub symbol: String,
    pub name: Option<String>,
    pub amount: f64,
    pub purchase_price: f64,
}

impl NewHolding {
    pub fn new(symbol: impl Into<String>, amount: f64, purchase_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            amount,
            purchase_price,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn validate(&self) -> PortfolioResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(invalid("symbol is empty"));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(invalid(format!(
                "amount must be greater than zero, got {}",
                self.amount
            )));
        }
        if !self.purchase_price.is_finite() || self.purchase_price < 0.0 {
            return Err(invalid(format!(
                "purchase price cannot be negative, got {}",
                self.purchase_price
            )));
        }
        Ok(())
    }

    /// Upper-cased symbol and a name that falls back to it
    pub(crate) fn normalized_parts(&self) -> (String, String) {
        let symbol = self.symbol.trim().to_uppercase();
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| symbol.clone());
        (symbol, name)
    }
}

fn invalid(reason: impl Into<String>) -> PortfolioError {
    PortfolioError::InvalidHolding {
        reason: reason.into(),
    }
}
