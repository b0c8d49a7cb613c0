use async_trait::async_trait;
use exchange_client::{BinanceClient, Kline, TickerPrice, TradeSet};

use super::MarketData;
use crate::error::Result;

#[async_trait]
impl MarketData for BinanceClient {
    async fn current_price(&self, symbol: Option<&str>) -> Result<Vec<TickerPrice>> {
        Ok(Self::current_price(self, symbol).await?)
    }

    async fn price_at_time(&self, symbol: &str, timestamp_ms: i64) -> Result<Vec<Kline>> {
        Ok(Self::price_at_time(self, symbol, timestamp_ms).await?)
    }

    async fn trades(&self, asset: &str, quote_assets: &[String]) -> Result<TradeSet> {
        Ok(Self::trades(self, asset, quote_assets).await?)
    }

    fn name(&self) -> &str {
        "Binance"
    }
}
