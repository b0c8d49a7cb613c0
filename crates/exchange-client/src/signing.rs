//! Request Parameters and HMAC Signing
//!
//! Signed endpoints take an HMAC-SHA256 over the URL-encoded query string,
//! hex encoded and appended as the final `signature` parameter.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ExchangeError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Ordered query parameters.
///
/// Insertion order is kept so the signed string and the sent string are
/// byte-for-byte the same.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// URL-encoded `key=value&...` form
    pub fn encode(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(&self.0)?)
    }
}

/// Hex HMAC-SHA256 of `message` keyed with `secret`
pub fn sign(secret: &str, message: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::Config(format!("invalid secret key: {e}")))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Encode `params` and append the signature parameter
pub fn signed_query(secret: &str, params: &QueryParams) -> Result<String> {
    let query = params.encode()?;
    let signature = sign(secret, &query)?;

    if query.is_empty() {
        Ok(format!("signature={signature}"))
    } else {
        Ok(format!("{query}&signature={signature}"))
    }
}
