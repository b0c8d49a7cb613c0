//! Response Models
//!
//! Typed views of the REST payloads. Prices and quantities arrive as JSON
//! strings and are parsed straight into `Decimal`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trades for one asset, keyed by the quote asset they were traded against
pub type TradeSet = BTreeMap<String, Vec<Trade>>;

/// `GET /api/v3/time`
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: i64,
}

/// One entry of the price table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: Decimal,
}

/// The price endpoint answers with an object for one symbol and an array
/// for the whole table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PriceTable {
    One(TickerPrice),
    All(Vec<TickerPrice>),
}

impl From<PriceTable> for Vec<TickerPrice> {
    fn from(table: PriceTable) -> Self {
        match table {
            PriceTable::One(price) => vec![price],
            PriceTable::All(prices) => prices,
        }
    }
}

/// A 1-minute candle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "KlineRow")]
pub struct Kline {
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: i64,
}

/// Wire layout of a kline: a 12 element positional array
#[derive(Deserialize)]
struct KlineRow(
    i64,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    i64,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
);

impl From<KlineRow> for Kline {
    fn from(row: KlineRow) -> Self {
        Self {
            open_time: row.0,
            open: row.1,
            high: row.2,
            low: row.3,
            close: row.4,
            volume: row.5,
            close_time: row.6,
        }
    }
}

/// `GET /api/v3/ticker/24hr`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingStats {
    pub symbol: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub weighted_avg_price: Decimal,
    pub last_price: Decimal,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub open_time: i64,
    pub close_time: i64,
    pub count: u64,
}

/// A single fill from `GET /api/v3/myTrades`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Pair symbol, e.g. `ADABTC`
    pub symbol: String,

    /// Exchange trade id
    pub id: u64,

    /// Price in the quote asset
    pub price: Decimal,

    #[serde(rename = "qty")]
    pub quantity: Decimal,

    pub commission: Decimal,

    pub commission_asset: String,

    /// Epoch milliseconds
    pub time: i64,

    pub is_buyer: bool,
}

impl Trade {
    pub fn new(
        symbol: impl Into<String>,
        time: i64,
        price: Decimal,
        quantity: Decimal,
        is_buyer: bool,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            id: 0,
            price,
            quantity,
            commission: Decimal::ZERO,
            commission_asset: String::new(),
            time,
            is_buyer,
        }
    }

    #[must_use]
    pub fn with_commission(mut self, amount: Decimal, asset: impl Into<String>) -> Self {
        self.commission = amount;
        self.commission_asset = asset.into().to_uppercase();
        self
    }
}
