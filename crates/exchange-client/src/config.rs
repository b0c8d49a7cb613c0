//! Client Configuration
//!
//! Credentials and endpoint settings. The environment is only read by the
//! `from_env` constructors; the client itself never looks at it.

use std::fmt;

use crate::error::{ExchangeError, Result};

/// Default REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "BINANCE_KEY";

/// Environment variable holding the secret key
pub const SECRET_KEY_VAR: &str = "BINANCE_SECRET";

/// Environment variable overriding the base URL
pub const BASE_URL_VAR: &str = "BINANCE_BASE_URL";

/// API key pair used for signed requests
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Load `BINANCE_KEY` / `BINANCE_SECRET` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ExchangeError::Config(format!("{API_KEY_VAR} not set")))?;
        let secret_key = lookup(SECRET_KEY_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ExchangeError::Config(format!("{SECRET_KEY_VAR} not set")))?;

        Ok(Self::new(api_key, secret_key))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Exchange client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// REST base URL, without trailing slash
    pub base_url: String,

    /// Key pair; only signed endpoints require it
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            credentials: None,
        }
    }
}

impl ClientConfig {
    /// Build from environment variables. Missing credentials are not an
    /// error here; public endpoints work without them.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::from_lookup(&lookup).ok(),
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
