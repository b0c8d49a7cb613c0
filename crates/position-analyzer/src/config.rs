//! Analyzer Configuration

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Default settlement currency
pub const DEFAULT_SETTLEMENT: &str = "USDT";

/// Quote assets searched when none are given
pub const DEFAULT_QUOTE_ASSETS: [&str; 3] = ["USDT", "BTC", "BNB"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Currency every value is normalized to
    pub settlement: String,

    /// Quote assets to fetch trades against, in merge order
    pub quote_assets: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            settlement: DEFAULT_SETTLEMENT.into(),
            quote_assets: DEFAULT_QUOTE_ASSETS.iter().map(|q| (*q).to_string()).collect(),
        }
    }
}

impl AnalyzerConfig {
    #[must_use]
    pub fn with_settlement(mut self, settlement: impl Into<String>) -> Self {
        self.settlement = settlement.into().to_uppercase();
        self
    }

    #[must_use]
    pub fn with_quote_assets<I, S>(mut self, quote_assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quote_assets = quote_assets
            .into_iter()
            .map(|q| q.into().to_uppercase())
            .collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.settlement.trim().is_empty() {
            return Err(AnalyzerError::Config("settlement currency is empty".into()));
        }
        if self.quote_assets.is_empty() {
            return Err(AnalyzerError::Config("no quote assets configured".into()));
        }
        if let Some(blank) = self.quote_assets.iter().find(|q| q.trim().is_empty()) {
            return Err(AnalyzerError::Config(format!("invalid quote asset '{blank}'")));
        }
        Ok(())
    }

    /// Quote assets to query for `asset`: the asset itself is skipped and
    /// duplicates are dropped, first occurrence wins.
    pub fn quotes_for(&self, asset: &str) -> Vec<String> {
        let asset = asset.to_uppercase();
        let mut quotes: Vec<String> = Vec::with_capacity(self.quote_assets.len());
        for quote in &self.quote_assets {
            let quote = quote.to_uppercase();
            if quote != asset && !quotes.contains(&quote) {
                quotes.push(quote);
            }
        }
        quotes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.settlement, "USDT");
        assert_eq!(config.quote_assets, ["USDT", "BTC", "BNB"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quotes_skip_target_asset() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.quotes_for("bnb"), ["USDT", "BTC"]);
        assert_eq!(config.quotes_for("ADA"), ["USDT", "BTC", "BNB"]);
    }

    #[test]
    fn test_builder_uppercases_and_dedups() {
        let config = AnalyzerConfig::default()
            .with_settlement("busd")
            .with_quote_assets(["busd", "eth", "BUSD"]);

        assert_eq!(config.settlement, "BUSD");
        assert_eq!(config.quotes_for("ADA"), ["BUSD", "ETH"]);
    }

    #[test]
    fn test_empty_quotes_rejected() {
        let config = AnalyzerConfig::default().with_quote_assets(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(AnalyzerError::Config(_))));
    }
}
