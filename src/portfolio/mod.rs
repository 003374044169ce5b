/// Portfolio tracking: persisted holdings valued against market prices
pub mod store;
pub mod types;
pub mod valuation;

pub use store::{HoldingsStore, HOLDINGS_KEY};
pub use types::{Holding, NewHolding};
pub use valuation::{
    holding_value, profit_loss, profit_loss_percent, HoldingValuation, PortfolioSummary,
    PriceBook, PriceQuote,
};
