//! Settlement Conversion
//!
//! Re-expresses amounts in the settlement currency using the open of the
//! 1-minute candle nearest the trade. The candle window is ±30 seconds, so
//! converted values are approximations, not fill-exact rates.

use std::sync::Arc;

use exchange_client::Trade;
use rust_decimal::Decimal;

use crate::error::{AnalyzerError, Result};
use crate::exchange::MarketData;
use crate::model::{PricePoint, SettledTrade, Side};

/// Converts amounts into one settlement currency
pub struct SettlementConverter {
    market: Arc<dyn MarketData>,
    settlement: String,
}

impl SettlementConverter {
    pub fn new(market: Arc<dyn MarketData>, settlement: impl Into<String>) -> Self {
        Self {
            market,
            settlement: settlement.into().to_uppercase(),
        }
    }

    pub fn settlement(&self) -> &str {
        &self.settlement
    }

    /// Settlement price of `asset` near `timestamp_ms`
    pub async fn price_point(&self, asset: &str, timestamp_ms: i64) -> Result<PricePoint> {
        let symbol = format!("{}{}", asset.to_uppercase(), self.settlement);
        let klines = self.market.price_at_time(&symbol, timestamp_ms).await?;

        let open = klines
            .first()
            .map(|k| k.open)
            .ok_or_else(|| AnalyzerError::HistoricalPriceUnavailable {
                symbol: symbol.clone(),
                timestamp_ms,
            })?;

        Ok(PricePoint {
            asset: asset.to_uppercase(),
            settlement: self.settlement.clone(),
            timestamp_ms,
            price: open,
        })
    }

    /// `amount` of `source_asset` at `timestamp_ms`, in the settlement currency.
    ///
    /// Identity when `source_asset` already is the settlement currency; no
    /// lookup is made in that case. Zero amounts skip the lookup too.
    pub async fn to_settlement(
        &self,
        amount: Decimal,
        source_asset: &str,
        timestamp_ms: i64,
    ) -> Result<Decimal> {
        if source_asset.eq_ignore_ascii_case(&self.settlement) || amount.is_zero() {
            return Ok(amount);
        }

        let point = self.price_point(source_asset, timestamp_ms).await?;
        tracing::debug!(
            asset = %point.asset,
            timestamp_ms,
            rate = %point.price,
            "Converted to settlement"
        );
        Ok(amount * point.price)
    }

    /// Convert a trade executed against `quote`
    pub async fn settle(&self, trade: Trade, quote: &str) -> Result<SettledTrade> {
        let price = self.to_settlement(trade.price, quote, trade.time).await?;
        let commission = self
            .to_settlement(trade.commission, &trade.commission_asset, trade.time)
            .await?;

        Ok(SettledTrade {
            time: trade.time,
            side: Side::from_buyer(trade.is_buyer),
            quantity: trade.quantity,
            price,
            commission,
            settlement: self.settlement.clone(),
            traded_against: quote.to_uppercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::MockMarketData;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_settlement_asset_is_identity_without_lookup() {
        let market = Arc::new(MockMarketData::new());
        let converter = SettlementConverter::new(market.clone(), "USDT");

        let trade = Trade::new("ADAUSDT", 1_000, dec!(1.25), dec!(10), true)
            .with_commission(dec!(0.01), "USDT");
        let settled = converter.settle(trade, "USDT").await.unwrap();

        assert_eq!(settled.price, dec!(1.25));
        assert_eq!(settled.commission, dec!(0.01));
        assert_eq!(settled.settlement, "USDT");
        assert!(market.lookups().await.is_empty());
    }

    #[tokio::test]
    async fn test_quote_and_commission_converted_at_trade_time() {
        let market = Arc::new(
            MockMarketData::new()
                .with_historical_price("BTCUSDT", dec!(40000))
                .with_historical_price("BNBUSDT", dec!(300)),
        );
        let converter = SettlementConverter::new(market.clone(), "USDT");

        let trade = Trade::new("ADABTC", 5_000, dec!(0.00001), dec!(100), false)
            .with_commission(dec!(0.001), "BNB");
        let settled = converter.settle(trade, "BTC").await.unwrap();

        assert_eq!(settled.price, dec!(0.4));
        assert_eq!(settled.commission, dec!(0.3));
        assert_eq!(settled.side, Side::Sell);
        assert_eq!(settled.traded_against, "BTC");
        assert_eq!(
            market.lookups().await,
            [("BTCUSDT".to_string(), 5_000), ("BNBUSDT".to_string(), 5_000)]
        );
    }

    #[tokio::test]
    async fn test_missing_candle_is_error() {
        let market = Arc::new(MockMarketData::new());
        let converter = SettlementConverter::new(market, "USDT");

        let err = converter.to_settlement(dec!(1), "BTC", 0).await.unwrap_err();
        assert_eq!(err.exchange_code(), Some(-1121));
    }

    #[tokio::test]
    async fn test_price_point_carries_open() {
        let market = Arc::new(MockMarketData::new().with_historical_price("ETHUSDT", dec!(2000)));
        let converter = SettlementConverter::new(market, "usdt");

        let point = converter.price_point("eth", 42).await.unwrap();
        assert_eq!(point.asset, "ETH");
        assert_eq!(point.settlement, "USDT");
        assert_eq!(point.price, dec!(2000));
    }
}
