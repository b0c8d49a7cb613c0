//! # exchange-client
//!
//! Minimal Binance spot REST client: public market data plus the signed
//! account-trades endpoint.
//!
//! ## Request paths
//!
//! ```text
//! unsigned:  GET {base}{path}?{params}
//!
//! signed:    GET {base}/api/v3/time                 -> serverTime
//!            GET {base}{path}?timestamp=..&{params}&signature=HMAC_SHA256(secret, query)
//!                X-MBX-APIKEY: {api_key}
//! ```
//!
//! Both paths decode the JSON body once; a body carrying `code` becomes
//! [`ExchangeError::Api`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use exchange_client::{BinanceClient, ClientConfig, Credentials};
//!
//! let config = ClientConfig::default()
//!     .with_credentials(Credentials::from_env()?);
//! let client = BinanceClient::new(config);
//!
//! let stats = client.rolling_24hr("BTCUSDT").await?;
//! let trades = client.trades("ADA", ["USDT", "BTC", "BNB"]).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod signing;
pub mod transport;

pub use client::{BinanceClient, PRICE_WINDOW_MS};
pub use config::{ClientConfig, Credentials};
pub use error::{ExchangeError, Result};
pub use model::{Kline, RollingStats, TickerPrice, Trade, TradeSet};
pub use signing::QueryParams;
pub use transport::{HttpTransport, MockTransport, ReqwestTransport};
