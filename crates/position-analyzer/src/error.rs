//! Error Types for Position Analysis

use exchange_client::ExchangeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// No table entry for `symbol`
    #[error("Price unavailable for {0}")]
    PriceUnavailable(String),

    /// No candle for `symbol` around the timestamp
    #[error("No {symbol} candle near {timestamp_ms}")]
    HistoricalPriceUnavailable { symbol: String, timestamp_ms: i64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// Error code reported by the exchange, if this came from one
    pub const fn exchange_code(&self) -> Option<i64> {
        match self {
            Self::Exchange(err) => err.code(),
            _ => None,
        }
    }
}
