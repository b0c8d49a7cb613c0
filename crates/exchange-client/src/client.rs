//! Binance REST Client
//!
//! Two request paths share one normalization step:
//!
//! - **unsigned**: plain GET with optional query parameters
//! - **signed**: fetches server time, adds `timestamp`, signs the encoded
//!   query with HMAC-SHA256 and sends the API key as a header
//!
//! Calls are issued one at a time. Nothing is cached or retried; every signed
//! call fetches server time again.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ExchangeError, Result};
use crate::model::{Kline, PriceTable, RollingStats, ServerTime, TickerPrice, Trade, TradeSet};
use crate::signing::{QueryParams, signed_query};
use crate::transport::{API_KEY_HEADER, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

const TIME_PATH: &str = "/api/v3/time";
const PRICE_PATH: &str = "/api/v3/ticker/price";
const KLINES_PATH: &str = "/api/v3/klines";
const ROLLING_24HR_PATH: &str = "/api/v3/ticker/24hr";
const MY_TRADES_PATH: &str = "/api/v3/myTrades";

/// Half width of the window searched around a historical timestamp
pub const PRICE_WINDOW_MS: i64 = 30_000;

/// Binance spot REST client
pub struct BinanceClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl BinanceClient {
    /// Create a client using the reqwest transport
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Exchange clock in epoch milliseconds
    pub async fn server_time(&self) -> Result<i64> {
        let time: ServerTime = self
            .unsigned_get(TIME_PATH, QueryParams::new(), "fetching server time")
            .await?;
        Ok(time.server_time)
    }

    /// Current price of `ticker`, or the full price table when `None`
    pub async fn current_price(&self, ticker: Option<&str>) -> Result<Vec<TickerPrice>> {
        let (params, context) = match ticker {
            Some(symbol) => (
                QueryParams::new().with("symbol", symbol),
                format!("fetching price for {symbol}"),
            ),
            None => (QueryParams::new(), "fetching price table".to_string()),
        };

        let table: PriceTable = self.unsigned_get(PRICE_PATH, params, &context).await?;
        Ok(table.into())
    }

    /// 1-minute candles within ±30 seconds of `timestamp_ms`.
    ///
    /// The raw slice is returned; callers normally take the first candle's
    /// open as an approximation of the price at that moment.
    pub async fn price_at_time(&self, ticker: &str, timestamp_ms: i64) -> Result<Vec<Kline>> {
        let params = QueryParams::new()
            .with("symbol", ticker)
            .with("interval", "1m")
            .with("startTime", timestamp_ms - PRICE_WINDOW_MS)
            .with("endTime", timestamp_ms + PRICE_WINDOW_MS);

        self.unsigned_get(
            KLINES_PATH,
            params,
            &format!("fetching {ticker} candles at {timestamp_ms}"),
        )
        .await
    }

    /// 24-hour rolling window statistics
    pub async fn rolling_24hr(&self, ticker: &str) -> Result<RollingStats> {
        let params = QueryParams::new().with("symbol", ticker);
        self.unsigned_get(
            ROLLING_24HR_PATH,
            params,
            &format!("fetching 24hr stats for {ticker}"),
        )
        .await
    }

    /// Account trades of `ticker` against each quote asset.
    ///
    /// Quote assets equal to `ticker` are skipped. One signed request is made
    /// per remaining quote asset, in the order given.
    pub async fn trades<I, S>(&self, ticker: &str, quote_assets: I) -> Result<TradeSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ticker = ticker.to_uppercase();
        let mut trade_set = TradeSet::new();

        for quote in quote_assets {
            let quote = quote.as_ref().to_uppercase();
            if quote == ticker {
                continue;
            }

            let symbol = format!("{ticker}{quote}");
            let params = QueryParams::new().with("symbol", &symbol);
            let trades: Vec<Trade> = self
                .signed_get(MY_TRADES_PATH, params, &format!("fetching trades for {symbol}"))
                .await?;

            tracing::debug!(symbol = %symbol, count = trades.len(), "Fetched trades");
            trade_set.insert(quote, trades);
        }

        Ok(trade_set)
    }

    /// Plain GET
    pub async fn unsigned_get<R: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        context: &str,
    ) -> Result<R> {
        let request = HttpRequest::get(self.url(path)).with_query(params.encode()?);
        tracing::debug!(path = %path, context = %context, "Unsigned request");

        let response = self.transport.get(request).await?;
        decode(&response, context)
    }

    /// Signed GET: server timestamp, HMAC signature, API key header
    pub async fn signed_get<R: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        context: &str,
    ) -> Result<R> {
        let credentials = self.config.credentials.as_ref().ok_or_else(|| {
            ExchangeError::Config(format!("credentials required for {context}"))
        })?;

        let timestamp = self.server_time().await?;
        let mut signed = QueryParams::new().with("timestamp", timestamp);
        signed.extend(params);

        let request = HttpRequest::get(self.url(path))
            .with_query(signed_query(credentials.secret_key(), &signed)?)
            .with_header(API_KEY_HEADER, credentials.api_key());
        tracing::debug!(path = %path, context = %context, timestamp, "Signed request");

        let response = self.transport.get(request).await?;
        decode(&response, context)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

/// Turn a raw response into `R`, or into the error it carries.
///
/// An object with a `code` field is an exchange error whatever the status.
fn decode<R: DeserializeOwned>(response: &HttpResponse, context: &str) -> Result<R> {
    let http_error = || ExchangeError::Http {
        status: response.status,
        body: response.body.clone(),
        context: context.to_string(),
    };

    let value: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(_) if !response.is_success() => return Err(http_error()),
        Err(e) => return Err(e.into()),
    };

    if let Some(raw_code) = value.get("code") {
        // Codes are integers on the wire; tolerate a quoted one
        let Some(code) = raw_code
            .as_i64()
            .or_else(|| raw_code.as_str().and_then(|s| s.trim().parse().ok()))
        else {
            return Err(http_error());
        };
        let message = value
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        tracing::warn!(code, message = %message, context = %context, "Exchange returned error");
        return Err(ExchangeError::Api {
            code,
            message,
            context: context.to_string(),
        });
    }

    if !response.is_success() {
        return Err(http_error());
    }

    Ok(serde_json::from_value(value)?)
}
