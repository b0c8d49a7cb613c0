//! Domain Models
//!
//! Trades after settlement conversion and the position derived from them.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trade direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const fn from_buyer(is_buyer: bool) -> Self {
        if is_buyer { Self::Buy } else { Self::Sell }
    }

    /// +1 for buys, -1 for sells
    pub const fn sign(self) -> Decimal {
        match self {
            Self::Buy => Decimal::ONE,
            Self::Sell => Decimal::NEGATIVE_ONE,
        }
    }

    pub const fn verb(self) -> &'static str {
        match self {
            Self::Buy => "Bought",
            Self::Sell => "Sold",
        }
    }
}

/// A quote asset's settlement price near a moment in time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Asset being priced, e.g. `BTC`
    pub asset: String,

    /// Settlement currency the price is expressed in
    pub settlement: String,

    /// Requested moment, epoch milliseconds
    pub timestamp_ms: i64,

    /// Open of the nearest 1-minute candle
    pub price: Decimal,
}

/// A trade with price and commission expressed in the settlement currency
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledTrade {
    /// Epoch milliseconds
    pub time: i64,

    pub side: Side,

    pub quantity: Decimal,

    /// Unit price in `settlement`
    pub price: Decimal,

    /// Commission in `settlement`
    pub commission: Decimal,

    /// Currency of `price` and `commission`
    pub settlement: String,

    /// Quote asset the trade was executed against
    pub traded_against: String,
}

impl SettledTrade {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

/// Accumulated position for one asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSummary {
    /// Asset analysed, e.g. `ADA`
    pub asset: String,

    pub settlement: String,

    /// Realized plus unrealized gain, net of commissions
    pub gain: Decimal,

    /// Net quantity held
    pub holding: Decimal,

    /// Current unit price in `settlement`
    pub current_price: Decimal,

    /// Trades folded in
    pub trade_count: usize,
}

impl PositionSummary {
    pub fn new(asset: impl Into<String>, settlement: impl Into<String>, current_price: Decimal) -> Self {
        Self {
            asset: asset.into().to_uppercase(),
            settlement: settlement.into().to_uppercase(),
            gain: Decimal::ZERO,
            holding: Decimal::ZERO,
            current_price,
            trade_count: 0,
        }
    }

    /// Fold one settled trade into the position.
    ///
    /// Commission always reduces gain, whichever side the trade was on.
    pub fn apply(&mut self, trade: &SettledTrade) {
        let sign = trade.side.sign();
        let change = trade.quantity * (self.current_price - trade.price);

        self.gain += sign * change;
        self.gain -= trade.commission;
        self.holding += sign * trade.quantity;
        self.trade_count += 1;
    }

    /// Current value of the holding
    pub fn holding_value(&self) -> Decimal {
        self.holding * self.current_price
    }
}

/// Summary plus the chronologically ordered trades behind it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReport {
    pub summary: PositionSummary,
    pub trades: Vec<SettledTrade>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(side: Side, quantity: Decimal, price: Decimal) -> SettledTrade {
        SettledTrade {
            time: 0,
            side,
            quantity,
            price,
            commission: Decimal::ZERO,
            settlement: "USDT".into(),
            traded_against: "USDT".into(),
        }
    }

    #[test]
    fn test_buy_then_partial_sell() {
        let mut summary = PositionSummary::new("ADA", "USDT", dec!(2.00));
        summary.apply(&trade(Side::Buy, dec!(10), dec!(1.00)));
        summary.apply(&trade(Side::Sell, dec!(4), dec!(1.50)));

        assert_eq!(summary.gain, dec!(8));
        assert_eq!(summary.holding, dec!(6));
        assert_eq!(summary.holding_value(), dec!(12));
        assert_eq!(summary.trade_count, 2);
    }

    #[test]
    fn test_commission_reduces_gain_on_buy() {
        let mut summary = PositionSummary::new("ADA", "USDT", dec!(1.00));
        let mut buy = trade(Side::Buy, dec!(10), dec!(1.00));
        buy.commission = dec!(0.5);
        summary.apply(&buy);

        assert_eq!(summary.gain, dec!(-0.5));
        assert_eq!(summary.holding, dec!(10));
    }

    #[test]
    fn test_commission_reduces_gain_on_sell() {
        let mut summary = PositionSummary::new("ADA", "USDT", dec!(1.00));
        let mut sell = trade(Side::Sell, dec!(3), dec!(1.00));
        sell.commission = dec!(0.25);
        summary.apply(&sell);

        assert_eq!(summary.gain, dec!(-0.25));
        assert_eq!(summary.holding, dec!(-3));
    }

    #[test]
    fn test_side_sign() {
        assert_eq!(Side::from_buyer(true), Side::Buy);
        assert_eq!(Side::Buy.sign(), dec!(1));
        assert_eq!(Side::Sell.sign(), dec!(-1));
        assert_eq!(Side::Sell.verb(), "Sold");
    }

    #[test]
    fn test_timestamp_conversion() {
        let mut t = trade(Side::Buy, dec!(1), dec!(1));
        t.time = 1_700_000_000_000;
        assert_eq!(t.timestamp().unwrap().timestamp(), 1_700_000_000);
    }
}
