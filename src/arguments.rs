/// Command-line arguments for coinfolio
///
/// Global flags control configuration and logging; every subcommand maps
/// to one gateway operation or one portfolio action.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "coinfolio")]
#[command(about = "Crypto market data and portfolio tracker", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to config.toml in the data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose log output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logs for a tag (api, cache, rate_limit, portfolio, config, external, all)
    #[arg(long = "debug", value_name = "TAG", global = true)]
    pub debug_tags: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Coins ordered by market cap
    Markets {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 50)]
        per_page: u32,
    },

    /// Detail for one coin id (e.g. "bitcoin")
    Coin { id: String },

    /// Price history for one coin id
    History {
        id: String,

        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Search coins by name or symbol
    Search { query: String },

    /// Currently trending coins
    Trending,

    /// Global market totals
    Global,

    /// Manage recorded holdings
    #[command(subcommand)]
    Portfolio(PortfolioCommand),
}

#[derive(Debug, Subcommand)]
pub enum PortfolioCommand {
    /// List holdings, optionally filtered by symbol or name
    List {
        #[arg(long)]
        filter: Option<String>,
    },

    /// Record a new holding
    Add(AddHolding),

    /// Delete a holding by id
    Remove { id: u64 },

    /// Value all holdings at current market prices
    Value,
}

#[derive(Debug, Args)]
pub struct AddHolding {
    pub symbol: String,
    pub amount: f64,
    /// Purchase price per coin in the quote currency
    pub price: f64,

    #[arg(long)]
    pub name: Option<String>,
}
