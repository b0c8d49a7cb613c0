//! Command handlers
//!
//! Each handler returns the text to print; nothing is printed on failure.

use std::sync::Arc;

use anyhow::Context;
use exchange_client::{BinanceClient, ClientConfig, Credentials, RollingStats, TickerPrice};
use position_analyzer::{AnalyzerConfig, PositionAnalyzer, svckit::report};

use crate::cli::Command;

pub async fn run(command: Command, config: ClientConfig) -> anyhow::Result<String> {
    match command {
        Command::Position {
            asset,
            quotes,
            settlement,
        } => position(config, &asset, quotes, &settlement).await,
        Command::Price { symbol } => price(config, symbol.as_deref()).await,
        Command::Stats { symbol } => stats(config, &symbol).await,
    }
}

async fn position(
    config: ClientConfig,
    asset: &str,
    quotes: Vec<String>,
    settlement: &str,
) -> anyhow::Result<String> {
    let config = match config.credentials {
        Some(_) => config,
        None => config.with_credentials(
            Credentials::from_env().context("position needs account credentials")?,
        ),
    };

    position_report(BinanceClient::new(config), asset, quotes, settlement).await
}

async fn position_report(
    client: BinanceClient,
    asset: &str,
    quotes: Vec<String>,
    settlement: &str,
) -> anyhow::Result<String> {
    let analyzer_config = AnalyzerConfig::default()
        .with_settlement(settlement)
        .with_quote_assets(quotes);
    let analyzer = PositionAnalyzer::new(Arc::new(client), analyzer_config)?;

    let report = analyzer
        .analyze(asset)
        .await
        .with_context(|| format!("analysis of {} aborted", asset.to_uppercase()))?;

    Ok(report::render(&report))
}

async fn price(config: ClientConfig, symbol: Option<&str>) -> anyhow::Result<String> {
    price_table(&BinanceClient::new(config), symbol).await
}

async fn price_table(client: &BinanceClient, symbol: Option<&str>) -> anyhow::Result<String> {
    let symbol = symbol.map(str::to_uppercase);
    let mut table = client.current_price(symbol.as_deref()).await?;
    table.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    Ok(render_prices(&table))
}

async fn stats(config: ClientConfig, symbol: &str) -> anyhow::Result<String> {
    let client = BinanceClient::new(config);
    let stats = client.rolling_24hr(&symbol.to_uppercase()).await?;

    Ok(render_stats(&stats))
}

fn render_prices(table: &[TickerPrice]) -> String {
    let mut output = String::new();
    for entry in table {
        output.push_str(&format!("{:<12} {}\n", entry.symbol, entry.price.normalize()));
    }
    output
}

fn render_stats(stats: &RollingStats) -> String {
    let mut output = format!("{} (24h)\n", stats.symbol);
    output.push_str(&"═".repeat(40));
    output.push('\n');

    let rows = [
        ("Last", stats.last_price),
        ("Open", stats.open_price),
        ("High", stats.high_price),
        ("Low", stats.low_price),
        ("Weighted avg", stats.weighted_avg_price),
        ("Change", stats.price_change),
        ("Change %", stats.price_change_percent),
        ("Volume", stats.volume),
        ("Quote volume", stats.quote_volume),
    ];
    for (label, value) in rows {
        output.push_str(&format!("  {label:<13} {}\n", value.normalize()));
    }
    output.push_str(&format!("  {:<13} {}\n", "Trades", stats.count));
    output
}
