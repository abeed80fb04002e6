//! Calculator configuration.
//!
//! A JSON file can override the session-start parameters and the rate
//! provenance shown next to results. Every key is optional:
//!
//! ```json
//! {
//!   "defaults": { "usd_needed": "250", "exchange_rate": "980.50" },
//!   "foreign_currency": "USD",
//!   "local_currency": "AOA",
//!   "rate_source_url": "https://www.bancobai.ao/pt/cambios-e-valores",
//!   "as_of": "2025-03-01"
//! }
//! ```

use crate::core::currency::{CurrencyCode, CurrencyPair, RateQuote};
use crate::core::parameters::Parameters;
use crate::error::ConfigError;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Published rate table the default exchange rate is read from.
pub const DEFAULT_RATE_SOURCE_URL: &str = "https://www.bancobai.ao/pt/cambios-e-valores";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Parameters a new session starts from.
    pub defaults: Parameters,
    pub foreign_currency: CurrencyCode,
    pub local_currency: CurrencyCode,
    pub rate_source_url: Option<String>,
    /// Reference date of the rate; today when unset.
    pub as_of: Option<NaiveDate>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            defaults: Parameters::default(),
            foreign_currency: CurrencyCode::new("USD"),
            local_currency: CurrencyCode::new("AOA"),
            rate_source_url: Some(DEFAULT_RATE_SOURCE_URL.to_string()),
            as_of: None,
        }
    }
}

impl CalculatorConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load `path` when given, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.foreign_currency.clone(), self.local_currency.clone())
    }

    /// Provenance of the primary rate currently in `params`.
    pub fn rate_quote(&self, params: &Parameters) -> RateQuote {
        RateQuote {
            pair: self.pair(),
            rate: params.exchange_rate,
            source_url: self.rate_source_url.clone(),
            as_of: self.as_of.unwrap_or_else(|| Utc::now().date_naive()),
        }
    }
}
