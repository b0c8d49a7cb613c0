//! Exchange Integration
//!
//! The analyzer only sees exchanges through `MarketData`.

mod binance;
mod mock;

pub use mock::MockMarketData;

use async_trait::async_trait;
use exchange_client::{Kline, TickerPrice, TradeSet};

use crate::error::Result;

/// Market data source (Strategy pattern)
///
/// `BinanceClient` implements it for live use; `MockMarketData` for tests.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Price table entry for `symbol`, or the whole table when `None`
    async fn current_price(&self, symbol: Option<&str>) -> Result<Vec<TickerPrice>>;

    /// 1-minute candles around `timestamp_ms`
    async fn price_at_time(&self, symbol: &str, timestamp_ms: i64) -> Result<Vec<Kline>>;

    /// Account trades of `asset` against each quote asset
    async fn trades(&self, asset: &str, quote_assets: &[String]) -> Result<TradeSet>;

    /// Source name
    fn name(&self) -> &str;
}
