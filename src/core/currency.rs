use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round an amount to whole cents, halves away from zero.
///
/// Every text report goes through this; `{:.2}` alone would cut the
/// extra digits off instead of rounding them.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Three-letter code naming one side of the card purchase: the foreign
/// currency loaded onto the card (USD by default) or the local currency
/// the account is debited in (AOA by default).
///
/// Codes are stored upper-cased, so `"usd"` in a config file and `USD`
/// on a report name the same currency.
///
/// ```
/// use landed_cost::core::currency::CurrencyCode;
///
/// let foreign = CurrencyCode::new("usd");
/// assert_eq!(foreign.as_str(), "USD");
/// assert_ne!(foreign, CurrencyCode::new("AOA"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A pair of currencies representing an exchange rate direction.
///
/// `base` is the foreign currency being bought, `quote` the local currency
/// paid for it: a rate of 974 on USD/AOA means 1 USD costs 974 AOA.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Provenance of the exchange rate used in a calculation.
///
/// The rate is entered by hand, so this only records where it was read
/// from and for which day. Nothing here is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub pair: CurrencyPair,
    pub rate: Decimal,
    pub source_url: Option<String>,
    pub as_of: NaiveDate,
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} per {} ({})",
            round_cents(self.rate),
            self.pair.quote,
            self.pair.base,
            self.as_of
        )?;
        if let Some(url) = &self.source_url {
            write!(f, " source: {}", url)?;
        }
        Ok(())
    }
}
