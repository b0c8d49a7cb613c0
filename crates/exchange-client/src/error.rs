//! Error Types for the Exchange Client

use thiserror::Error;

/// Result type alias for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Exchange client errors
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The exchange answered with an error code in the body
    #[error("Exchange error {code} while {context}: {message}")]
    Api {
        code: i64,
        message: String,
        context: String,
    },

    /// Non-success status without a recognizable error body
    #[error("HTTP {status} while {context}: {body}")]
    Http {
        status: u16,
        body: String,
        context: String,
    },

    /// Signed endpoint called without credentials
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Query encoding error: {0}")]
    Encoding(#[from] serde_urlencoded::ser::Error),
}

impl ExchangeError {
    /// Error code reported by the exchange, if any
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_embeds_code_and_message() {
        let err = ExchangeError::Api {
            code: -1121,
            message: "Invalid symbol.".into(),
            context: "fetching price for FOOUSDT".into(),
        };

        let text = err.to_string();
        assert!(text.contains("-1121"));
        assert!(text.contains("Invalid symbol."));
        assert!(text.contains("FOOUSDT"));
        assert_eq!(err.code(), Some(-1121));
    }

    #[test]
    fn test_config_error_has_no_code() {
        let err = ExchangeError::Config("missing credentials".into());
        assert_eq!(err.code(), None);
    }
}
