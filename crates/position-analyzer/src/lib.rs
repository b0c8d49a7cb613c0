//! # position-analyzer
//!
//! Realized plus unrealized gain and current holding for one asset, from an
//! account's trade history across several quote assets.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────┐   ┌──────────────┐
//! │ trades per   │──▶│ settle price and │──▶│ stable     │──▶│ fold into    │
//! │ quote asset  │   │ commission (USDT)│   │ time sort  │   │ summary      │
//! └──────────────┘   └──────────────────┘   └────────────┘   └──────────────┘
//! ```
//!
//! For each trade, oldest first:
//!
//! ```text
//! gain    += sign * qty * (current_price - price) - commission
//! holding += sign * qty                  (sign: +1 buy, -1 sell)
//! ```
//!
//! Non-settlement legs are priced with the open of the 1-minute candle
//! nearest the trade, so values are approximate by up to 30 seconds of
//! price movement.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use exchange_client::{BinanceClient, ClientConfig, Credentials};
//! use position_analyzer::{AnalyzerConfig, PositionAnalyzer};
//!
//! let client = BinanceClient::new(
//!     ClientConfig::default().with_credentials(Credentials::from_env()?),
//! );
//! let analyzer = PositionAnalyzer::new(Arc::new(client), AnalyzerConfig::default())?;
//! let report = analyzer.analyze("ADA").await?;
//! println!("{}", position_analyzer::svckit::report::render(&report));
//! ```

pub mod config;
pub mod error;
pub mod exchange;
pub mod model;
pub mod svckit;

pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use exchange::{MarketData, MockMarketData};
pub use model::{PositionReport, PositionSummary, PricePoint, SettledTrade, Side};
pub use svckit::{PositionAnalyzer, SettlementConverter};
