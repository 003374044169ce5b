use anyhow::{anyhow, Context, Result};
use clap::Parser;
use coinfolio::{
    arguments::{Cli, Command, PortfolioCommand},
    config::{get_config_clone, load_config_from_path, Config},
    display,
    logger::{self, LogTag, LoggerConfig},
    market_data::{HistoryInterval, MarketDataGateway},
    paths,
    portfolio::{HoldingValuation, HoldingsStore, NewHolding, PortfolioSummary, PriceBook},
};
use std::path::PathBuf;

/// Main entry point for coinfolio
///
/// Loads configuration, initializes logging, runs one command and exits
/// non-zero when it fails.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logger::init(LoggerConfig::from_flags(cli.verbose, &cli.debug_tags));

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            logger::error(LogTag::System, &format!("{:#}", e));
            1
        }
    };

    logger::flush();
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    paths::ensure_base_directory().context("Failed to create data directory")?;

    let config_path = cli.config.clone().unwrap_or_else(paths::get_config_path);
    load_config_from_path(&config_path).map_err(|e| anyhow!(e))?;
    let config = get_config_clone();

    apply_logging_config(&cli, &config);
    logger::debug(
        LogTag::System,
        &format!("Data directory: {}", paths::get_base_directory().display()),
    );

    match cli.command {
        Command::Portfolio(command) => run_portfolio(command, &config).await,
        command => run_market(command, &gateway(&config)?).await,
    }
}

fn apply_logging_config(cli: &Cli, config: &Config) {
    let mut logger_config = LoggerConfig::from_flags(cli.verbose, &cli.debug_tags);
    logger_config.show_date = config.logging.show_date;
    if !config.logging.file_path.trim().is_empty() {
        logger_config.file_path = Some(PathBuf::from(&config.logging.file_path));
    }
    logger::init(logger_config);
}

fn gateway(config: &Config) -> Result<MarketDataGateway> {
    MarketDataGateway::from_config(&config.gateway).map_err(|e| anyhow!(e))
}

async fn run_market(command: Command, gateway: &MarketDataGateway) -> Result<()> {
    match command {
        Command::Markets { page, per_page } => {
            let records = gateway.get_market_list(page, per_page).await?;
            println!("{}", display::market_table(&records));
        }
        Command::Coin { id } => {
            let detail = gateway.get_coin(&id).await?;
            println!("{}", display::coin_table(&detail));
            if let Some(description) = &detail.description {
                println!("\n{}", description);
            }
        }
        Command::History { id, days } => {
            let interval = HistoryInterval::for_days(days);
            let series = gateway.get_history(&id, days, interval).await?;
            println!("{}", display::history_table(&series));
            if let Some(change) = series.price_change_percent() {
                println!("Change over {} day(s): {:+.2}%", days, change);
            }
        }
        Command::Search { query } => {
            let hits = gateway.search(&query).await?;
            if hits.is_empty() {
                println!("No coins match '{}'", query);
            } else {
                println!("{}", display::search_table(&hits));
            }
        }
        Command::Trending => {
            let coins = gateway.get_trending().await?;
            println!("{}", display::trending_table(&coins));
        }
        Command::Global => {
            let stats = gateway.get_global_stats().await?;
            println!("{}", display::global_table(&stats));
        }
        Command::Portfolio(_) => return Err(anyhow!("portfolio commands need no market query")),
    }

    logger::debug(
        LogTag::Api,
        &format!("\n{}", display::stats_table(&gateway.stats())),
    );
    Ok(())
}

async fn run_portfolio(command: PortfolioCommand, config: &Config) -> Result<()> {
    let holdings_path = paths::resolve_configured(
        &config.portfolio.holdings_path,
        paths::get_holdings_path(),
    );
    let store = HoldingsStore::new(holdings_path);

    match command {
        PortfolioCommand::List { filter } => {
            let holdings = store.filter(filter.as_deref().unwrap_or(""))?;
            if holdings.is_empty() {
                println!("No holdings recorded");
                return Ok(());
            }
            println!("{}", display::holding_list_table(&holdings));
        }
        PortfolioCommand::Add(add) => {
            let mut input = NewHolding::new(add.symbol, add.amount, add.price);
            if let Some(name) = add.name {
                input = input.with_name(name);
            }
            let holding = store.add(input).context("Failed to add holding")?;
            println!("Added holding {} ({})", holding.id, holding.symbol);
        }
        PortfolioCommand::Remove { id } => {
            if store.remove(id)? {
                println!("Removed holding {}", id);
            } else {
                return Err(anyhow!("No holding with id {}", id));
            }
        }
        PortfolioCommand::Value => {
            let holdings = store.load()?;
            if holdings.is_empty() {
                println!("No holdings recorded");
                return Ok(());
            }

            let gateway = gateway(config)?;
            let market = gateway
                .get_market_list(1, config.portfolio.pricing_page_size)
                .await?;
            let prices = PriceBook::from_market(&market);

            let unpriced: Vec<_> = holdings
                .iter()
                .filter(|holding| prices.quote(&holding.symbol).is_none())
                .map(|holding| holding.symbol.as_str())
                .collect();
            if !unpriced.is_empty() {
                logger::warning(
                    LogTag::Portfolio,
                    &format!("No market price for {}, valued at 0", unpriced.join(", ")),
                );
            }

            let valuations: Vec<_> = holdings
                .iter()
                .map(|holding| HoldingValuation::new(holding, &prices))
                .collect();
            println!("{}", display::holdings_table(&valuations));
            println!(
                "{}",
                display::summary_table(&PortfolioSummary::calculate(&holdings, &prices))
            );
        }
    }

    Ok(())
}
