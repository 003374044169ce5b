/// Console tables for command output
use crate::apis::ApiStats;
use crate::market_data::{
    CoinDetail, GlobalStats, HistorySeries, MarketRecord, SearchHit, TrendingCoin,
};
use crate::portfolio::{Holding, HoldingValuation, PortfolioSummary};
use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

const MISSING: &str = "-";

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
    );
    table
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() >= 1.0 => format!("{:.2}", v),
        Some(v) => format!("{:.8}", v),
        None => MISSING.to_string(),
    }
}

fn compact(value: Option<f64>) -> String {
    let Some(v) = value else {
        return MISSING.to_string();
    };
    let abs = v.abs();
    if abs >= 1e12 {
        format!("{:.2}T", v / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else {
        format!("{:.2}", v)
    }
}

fn rank(value: Option<u32>) -> String {
    value.map(|r| r.to_string()).unwrap_or_else(|| MISSING.to_string())
}

/// Signed percent, green when non-negative
fn change_cell(value: Option<f64>) -> Cell {
    match value {
        Some(v) if v >= 0.0 => Cell::new(format!("+{:.2}%", v)).fg(Color::Green),
        Some(v) => Cell::new(format!("{:.2}%", v)).fg(Color::Red),
        None => Cell::new(MISSING),
    }
    .set_alignment(CellAlignment::Right)
}

fn signed_money_cell(value: f64) -> Cell {
    if value >= 0.0 {
        Cell::new(format!("+{:.2}", value)).fg(Color::Green)
    } else {
        Cell::new(format!("{:.2}", value)).fg(Color::Red)
    }
}

pub fn market_table(records: &[MarketRecord]) -> Table {
    let mut table = new_table(&[
        "#", "Coin", "Symbol", "Price", "1h", "24h", "7d", "Market Cap", "Volume",
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(rank(record.market_cap_rank)),
            Cell::new(&record.name),
            Cell::new(&record.symbol),
            Cell::new(money(record.current_price)),
            change_cell(record.price_change_percentage_1h),
            change_cell(record.price_change_percentage_24h),
            change_cell(record.price_change_percentage_7d),
            Cell::new(compact(record.market_cap)),
            Cell::new(compact(record.total_volume)),
        ]);
    }
    table
}

pub fn coin_table(detail: &CoinDetail) -> Table {
    let mut table = new_table(&["Field", "Value"]);
    let rows: Vec<(&str, Cell)> = vec![
        ("Name", Cell::new(format!("{} ({})", detail.name, detail.symbol))),
        ("Rank", Cell::new(rank(detail.market_cap_rank))),
        ("Price", Cell::new(money(detail.current_price))),
        ("24h", change_cell(detail.price_change_percentage_24h)),
        ("7d", change_cell(detail.price_change_percentage_7d)),
        ("30d", change_cell(detail.price_change_percentage_30d)),
        ("Market Cap", Cell::new(compact(detail.market_cap))),
        ("Volume", Cell::new(compact(detail.total_volume))),
        ("Circulating", Cell::new(compact(detail.circulating_supply))),
        ("Total Supply", Cell::new(compact(detail.total_supply))),
        ("Max Supply", Cell::new(compact(detail.max_supply))),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value]);
    }
    table
}

pub fn history_table(series: &HistorySeries) -> Table {
    let mut table = new_table(&["Time (UTC)", "Price"]);
    for point in &series.prices {
        table.add_row(vec![
            Cell::new(point.timestamp.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(money(Some(point.price))),
        ]);
    }
    table
}

pub fn search_table(hits: &[SearchHit]) -> Table {
    let mut table = new_table(&["Id", "Name", "Symbol", "Rank"]);
    for hit in hits {
        table.add_row(vec![
            Cell::new(&hit.id),
            Cell::new(&hit.name),
            Cell::new(&hit.symbol),
            Cell::new(rank(hit.market_cap_rank)),
        ]);
    }
    table
}

pub fn trending_table(coins: &[TrendingCoin]) -> Table {
    let mut table = new_table(&["Id", "Name", "Symbol", "Rank", "Price (BTC)"]);
    for coin in coins {
        table.add_row(vec![
            Cell::new(&coin.id),
            Cell::new(&coin.name),
            Cell::new(&coin.symbol),
            Cell::new(rank(coin.market_cap_rank)),
            Cell::new(money(coin.price_btc)),
        ]);
    }
    table
}

pub fn global_table(stats: &GlobalStats) -> Table {
    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Market Cap"),
        Cell::new(compact(stats.total_market_cap)),
    ]);
    table.add_row(vec![
        Cell::new("Total Volume"),
        Cell::new(compact(stats.total_volume)),
    ]);
    table.add_row(vec![
        Cell::new("24h Market Cap Change"),
        change_cell(stats.market_cap_change_percentage_24h_usd),
    ]);
    table.add_row(vec![
        Cell::new("Active Coins"),
        Cell::new(
            stats
                .active_cryptocurrencies
                .map(|n| n.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        ),
    ]);

    let mut dominance: Vec<_> = stats.market_cap_percentage.iter().collect();
    dominance.sort_by(|a, b| b.1.total_cmp(a.1));
    for (symbol, share) in dominance.into_iter().take(5) {
        table.add_row(vec![
            Cell::new(format!("{} dominance", symbol.to_uppercase())),
            Cell::new(format!("{:.2}%", share)),
        ]);
    }
    table
}

/// Recorded holdings without market prices
pub fn holding_list_table(holdings: &[Holding]) -> Table {
    let mut table = new_table(&["Id", "Symbol", "Name", "Amount", "Buy Price", "Cost", "Added"]);
    for holding in holdings {
        table.add_row(vec![
            Cell::new(holding.id),
            Cell::new(&holding.symbol),
            Cell::new(&holding.name),
            Cell::new(format!("{}", holding.amount)),
            Cell::new(money(Some(holding.purchase_price))),
            Cell::new(format!("{:.2}", holding.purchase_value())),
            Cell::new(holding.date_added.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

pub fn holdings_table(valuations: &[HoldingValuation]) -> Table {
    let mut table = new_table(&[
        "Id", "Symbol", "Name", "Amount", "Buy Price", "Price", "Value", "P&L", "P&L %",
    ]);
    for valuation in valuations {
        let holding = &valuation.holding;
        table.add_row(vec![
            Cell::new(holding.id),
            Cell::new(&holding.symbol),
            Cell::new(&holding.name),
            Cell::new(format!("{}", holding.amount)),
            Cell::new(money(Some(holding.purchase_price))),
            Cell::new(money(Some(valuation.current_price))),
            Cell::new(format!("{:.2}", valuation.value)),
            signed_money_cell(valuation.profit_loss),
            change_cell(Some(valuation.profit_loss_percent)),
        ]);
    }
    table
}

pub fn summary_table(summary: &PortfolioSummary) -> Table {
    let mut table = new_table(&["Total Value", "Total Cost", "P&L", "P&L %"]);
    table.add_row(vec![
        Cell::new(format!("{:.2}", summary.total_value)),
        Cell::new(format!("{:.2}", summary.total_cost)),
        signed_money_cell(summary.total_profit_loss),
        change_cell(Some(summary.total_profit_loss_percent)),
    ]);
    table
}

pub fn stats_table(stats: &ApiStats) -> Table {
    let mut table = new_table(&[
        "Requests",
        "Failed",
        "Cache Hits",
        "Expired",
        "Hit Rate",
        "Avg ms",
    ]);
    table.add_row(vec![
        Cell::new(stats.total_requests),
        Cell::new(stats.failed_requests),
        Cell::new(stats.cache_hits),
        Cell::new(stats.cache_expirations),
        Cell::new(format!("{:.0}%", stats.cache_hit_rate() * 100.0)),
        Cell::new(format!("{:.0}", stats.average_response_time_ms)),
    ]);
    table
}
