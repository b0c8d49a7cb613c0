//! Command line definitions
//!
//! | Command | Description |
//! |---------|-------------|
//! | `position` | Gain and holding for one asset across quote assets |
//! | `price` | Current price of a symbol, or the full table |
//! | `stats` | 24-hour rolling statistics of a symbol |

use clap::{Parser, Subcommand};
use position_analyzer::config::{DEFAULT_QUOTE_ASSETS, DEFAULT_SETTLEMENT};

/// Binance trade history ledger
///
/// Credentials are read from `BINANCE_KEY` and `BINANCE_SECRET` (a `.env`
/// file is honoured). `BINANCE_BASE_URL` overrides the API endpoint.
#[derive(Debug, Parser)]
#[command(name = "ledger", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Gain/loss and holding of an asset, in the settlement currency
    Position {
        /// Asset to analyse, e.g. ADA
        asset: String,

        /// Quote asset to include (repeatable)
        #[arg(long = "quote", value_name = "ASSET", default_values_t = DEFAULT_QUOTE_ASSETS.map(String::from))]
        quotes: Vec<String>,

        /// Currency all values are converted to
        #[arg(long, default_value = DEFAULT_SETTLEMENT)]
        settlement: String,
    },

    /// Current price of a symbol; whole table when omitted
    Price {
        /// Pair symbol, e.g. BTCUSDT
        symbol: Option<String>,
    },

    /// 24-hour rolling window statistics
    Stats {
        /// Pair symbol, e.g. BTCUSDT
        symbol: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_defaults() {
        let cli = Cli::try_parse_from(["ledger", "position", "ADA"]).unwrap();
        match cli.command {
            Command::Position { asset, quotes, settlement } => {
                assert_eq!(asset, "ADA");
                assert_eq!(quotes, ["USDT", "BTC", "BNB"]);
                assert_eq!(settlement, "USDT");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_position_custom_quotes() {
        let cli = Cli::try_parse_from([
            "ledger", "position", "ADA", "--quote", "USDT", "--quote", "ETH", "--settlement", "BUSD",
        ])
        .unwrap();

        match cli.command {
            Command::Position { quotes, settlement, .. } => {
                assert_eq!(quotes, ["USDT", "ETH"]);
                assert_eq!(settlement, "BUSD");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_price_symbol_optional() {
        let cli = Cli::try_parse_from(["ledger", "price"]).unwrap();
        assert!(matches!(cli.command, Command::Price { symbol: None }));
    }

    #[test]
    fn test_stats_requires_symbol() {
        assert!(Cli::try_parse_from(["ledger", "stats"]).is_err());
    }
}
