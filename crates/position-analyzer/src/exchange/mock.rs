//! Mock Market Data
//!
//! For testing and demo purposes. Serves static prices and scripted trades,
//! and records every historical lookup it answers.

use std::collections::HashMap;

use async_trait::async_trait;
use exchange_client::{ExchangeError, Kline, TickerPrice, Trade, TradeSet};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::MarketData;
use crate::error::Result;

/// Mock market with static prices
#[derive(Debug, Default)]
pub struct MockMarketData {
    /// Current prices by pair symbol
    prices: HashMap<String, Decimal>,

    /// Historical open prices by pair symbol, constant over time
    historical: HashMap<String, Decimal>,

    /// Trades by quote asset
    trades: TradeSet,

    /// `(symbol, timestamp_ms)` of each historical lookup served
    lookups: Mutex<Vec<(String, i64)>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_uppercase(), price);
        self
    }

    #[must_use]
    pub fn with_historical_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.historical.insert(symbol.to_uppercase(), price);
        self
    }

    #[must_use]
    pub fn with_trades(mut self, quote: &str, trades: Vec<Trade>) -> Self {
        self.trades.insert(quote.to_uppercase(), trades);
        self
    }

    /// Historical lookups served so far
    pub async fn lookups(&self) -> Vec<(String, i64)> {
        self.lookups.lock().await.clone()
    }

    /// Same shape as the exchange's answer for an unknown pair
    fn invalid_symbol(symbol: &str) -> ExchangeError {
        ExchangeError::Api {
            code: -1121,
            message: "Invalid symbol.".into(),
            context: format!("mock lookup of {symbol}"),
        }
    }
}

#[async_trait]
impl MarketData for MockMarketData {
    async fn current_price(&self, symbol: Option<&str>) -> Result<Vec<TickerPrice>> {
        let table = self
            .prices
            .iter()
            .map(|(symbol, price)| TickerPrice {
                symbol: symbol.clone(),
                price: *price,
            });

        match symbol {
            None => Ok(table.collect()),
            Some(symbol) => {
                let symbol = symbol.to_uppercase();
                let found: Vec<_> = table.filter(|t| t.symbol == symbol).collect();
                if found.is_empty() {
                    Err(Self::invalid_symbol(&symbol).into())
                } else {
                    Ok(found)
                }
            }
        }
    }

    async fn price_at_time(&self, symbol: &str, timestamp_ms: i64) -> Result<Vec<Kline>> {
        let symbol = symbol.to_uppercase();
        self.lookups.lock().await.push((symbol.clone(), timestamp_ms));

        let open = self
            .historical
            .get(&symbol)
            .copied()
            .ok_or_else(|| Self::invalid_symbol(&symbol))?;

        // Candle opening on the minute containing the timestamp
        let open_time = timestamp_ms - timestamp_ms.rem_euclid(60_000);
        Ok(vec![Kline {
            open_time,
            open,
            high: open,
            low: open,
            close: open,
            volume: Decimal::ZERO,
            close_time: open_time + 59_999,
        }])
    }

    async fn trades(&self, asset: &str, quote_assets: &[String]) -> Result<TradeSet> {
        let asset = asset.to_uppercase();
        Ok(quote_assets
            .iter()
            .filter(|quote| **quote != asset)
            .map(|quote| {
                let trades = self.trades.get(quote).cloned().unwrap_or_default();
                (quote.clone(), trades)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}
