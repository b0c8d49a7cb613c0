//! Position Analyzer
//!
//! Turns multi-quote trade history into one settlement-currency position:
//!
//! 1. current settlement price of the asset
//! 2. trades against every configured quote asset
//! 3. per-trade conversion of price and commission
//! 4. stable chronological merge
//! 5. single pass fold into a `PositionSummary`
//!
//! Any failure aborts the run; no partial summary is produced.

use std::sync::Arc;

use exchange_client::TradeSet;
use rust_decimal::Decimal;

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::exchange::MarketData;
use crate::model::{PositionReport, PositionSummary, SettledTrade};
use crate::svckit::SettlementConverter;

pub struct PositionAnalyzer {
    market: Arc<dyn MarketData>,
    config: AnalyzerConfig,
    converter: SettlementConverter,
}

impl PositionAnalyzer {
    pub fn new(market: Arc<dyn MarketData>, config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let converter = SettlementConverter::new(market.clone(), config.settlement.clone());

        Ok(Self {
            market,
            config,
            converter,
        })
    }

    /// Full analysis of `asset`
    pub async fn analyze(&self, asset: &str) -> Result<PositionReport> {
        let asset = asset.to_uppercase();
        tracing::info!(
            asset = %asset,
            settlement = %self.config.settlement,
            source = self.market.name(),
            "Analyzing position"
        );

        let current_price = self.current_price(&asset).await?;

        let quotes = self.config.quotes_for(&asset);
        let trade_set = self.market.trades(&asset, &quotes).await?;

        let mut trades = self.settle_all(trade_set, &quotes).await?;
        sort_chronologically(&mut trades);

        let summary = summarize(&asset, &self.config.settlement, current_price, &trades);
        tracing::info!(
            asset = %asset,
            trades = summary.trade_count,
            gain = %summary.gain,
            holding = %summary.holding,
            "Position computed"
        );

        Ok(PositionReport { summary, trades })
    }

    /// Current settlement price of `asset`, filtered from the price table
    pub async fn current_price(&self, asset: &str) -> Result<Decimal> {
        let asset = asset.to_uppercase();
        if asset == self.config.settlement {
            return Ok(Decimal::ONE);
        }

        let symbol = format!("{asset}{}", self.config.settlement);
        self.market
            .current_price(Some(&symbol))
            .await?
            .into_iter()
            .find(|entry| entry.symbol.eq_ignore_ascii_case(&symbol))
            .map(|entry| entry.price)
            .ok_or(AnalyzerError::PriceUnavailable(symbol))
    }

    /// Convert every trade, merged in `quotes` order
    pub async fn settle_all(
        &self,
        mut trade_set: TradeSet,
        quotes: &[String],
    ) -> Result<Vec<SettledTrade>> {
        let mut settled = Vec::with_capacity(trade_set.values().map(Vec::len).sum());

        for quote in quotes {
            let Some(trades) = trade_set.remove(quote) else {
                continue;
            };
            for trade in trades {
                settled.push(self.converter.settle(trade, quote).await?);
            }
        }

        // Quotes the source returned but were not asked for
        for (quote, trades) in trade_set {
            tracing::warn!(quote = %quote, count = trades.len(), "Unrequested quote asset");
            for trade in trades {
                settled.push(self.converter.settle(trade, &quote).await?);
            }
        }

        Ok(settled)
    }
}

/// Stable ascending sort by trade time; equal times keep their order
pub fn sort_chronologically(trades: &mut [SettledTrade]) {
    trades.sort_by_key(|t| t.time);
}

/// Fold settled trades, oldest first, into a summary
pub fn summarize(
    asset: &str,
    settlement: &str,
    current_price: Decimal,
    trades: &[SettledTrade],
) -> PositionSummary {
    trades.iter().fold(
        PositionSummary::new(asset, settlement, current_price),
        |mut summary, trade| {
            summary.apply(trade);
            summary
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::MockMarketData;
    use crate::model::Side;
    use exchange_client::Trade;
    use rust_decimal_macros::dec;

    fn settled(time: i64, side: Side, quantity: Decimal, price: Decimal) -> SettledTrade {
        SettledTrade {
            time,
            side,
            quantity,
            price,
            commission: Decimal::ZERO,
            settlement: "USDT".into(),
            traded_against: "USDT".into(),
        }
    }

    fn analyzer(market: MockMarketData) -> (Arc<MockMarketData>, PositionAnalyzer) {
        let market = Arc::new(market);
        let analyzer = PositionAnalyzer::new(market.clone(), AnalyzerConfig::default()).unwrap();
        (market, analyzer)
    }

    #[test]
    fn test_summarize_documented_example() {
        let trades = [
            settled(1, Side::Buy, dec!(10), dec!(1.00)),
            settled(2, Side::Sell, dec!(4), dec!(1.50)),
        ];

        let summary = summarize("ADA", "USDT", dec!(2.00), &trades);
        assert_eq!(summary.gain, dec!(8));
        assert_eq!(summary.holding, dec!(6));
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut trades = vec![
            settled(30, Side::Buy, dec!(1), dec!(1)),
            settled(10, Side::Buy, dec!(2), dec!(1)),
            settled(30, Side::Sell, dec!(3), dec!(1)),
            settled(10, Side::Sell, dec!(4), dec!(1)),
        ];

        sort_chronologically(&mut trades);
        let quantities: Vec<_> = trades.iter().map(|t| t.quantity).collect();
        assert_eq!(quantities, [dec!(2), dec!(4), dec!(1), dec!(3)]);

        let once = trades.clone();
        sort_chronologically(&mut trades);
        assert_eq!(trades, once);
    }

    #[tokio::test]
    async fn test_analyze_converts_and_merges() {
        let (market, analyzer) = analyzer(
            MockMarketData::new()
                .with_price("ADAUSDT", dec!(2.00))
                .with_historical_price("BTCUSDT", dec!(50000))
                .with_trades(
                    "USDT",
                    vec![Trade::new("ADAUSDT", 2_000, dec!(1.50), dec!(4), false)],
                )
                .with_trades(
                    "BTC",
                    vec![Trade::new("ADABTC", 1_000, dec!(0.00002), dec!(10), true)],
                ),
        );

        let report = analyzer.analyze("ada").await.unwrap();

        // BTC leg priced at 0.00002 * 50000 = 1.00 USDT and sorted first
        assert_eq!(report.trades[0].traded_against, "BTC");
        assert_eq!(report.trades[0].price, dec!(1.00));
        assert_eq!(report.trades[1].traded_against, "USDT");
        assert!(report.trades.iter().all(|t| t.settlement == "USDT"));

        assert_eq!(report.summary.gain, dec!(8));
        assert_eq!(report.summary.holding, dec!(6));
        assert_eq!(report.summary.holding_value(), dec!(12));
        assert_eq!(report.summary.current_price, dec!(2.00));

        // only the BTC trade needed a historical lookup
        assert_eq!(market.lookups().await, [("BTCUSDT".to_string(), 1_000)]);
    }

    #[tokio::test]
    async fn test_settlement_only_history_needs_no_lookups() {
        let (market, analyzer) = analyzer(
            MockMarketData::new()
                .with_price("ADAUSDT", dec!(1.00))
                .with_trades(
                    "USDT",
                    vec![
                        Trade::new("ADAUSDT", 1, dec!(1.00), dec!(10), true)
                            .with_commission(dec!(0.5), "USDT"),
                    ],
                ),
        );

        let report = analyzer.analyze("ADA").await.unwrap();
        assert_eq!(report.summary.gain, dec!(-0.5));
        assert_eq!(report.trades[0].price, dec!(1.00));
        assert_eq!(report.trades[0].commission, dec!(0.5));
        assert!(market.lookups().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_lookup_aborts_analysis() {
        let (_, analyzer) = analyzer(
            MockMarketData::new()
                .with_price("ADAUSDT", dec!(1.00))
                .with_trades(
                    "BNB",
                    vec![Trade::new("ADABNB", 1, dec!(0.001), dec!(10), true)],
                ),
        );

        let err = analyzer.analyze("ADA").await.unwrap_err();
        assert_eq!(err.exchange_code(), Some(-1121));
    }

    #[tokio::test]
    async fn test_missing_current_price_aborts() {
        let (_, analyzer) = analyzer(MockMarketData::new());
        let err = analyzer.analyze("ADA").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Exchange(_)));
    }

    #[tokio::test]
    async fn test_settlement_asset_prices_at_one() {
        let (_, analyzer) = analyzer(MockMarketData::new());
        assert_eq!(analyzer.current_price("usdt").await.unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalyzerConfig::default().with_settlement("");
        let result = PositionAnalyzer::new(Arc::new(MockMarketData::new()), config);
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }
}
