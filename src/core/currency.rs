//! Currency codes

use crate::core::conversion::ConversionError;
use std::fmt::Display;
use std::str::FromStr;

/// Currencies offered by the conversion form, with their display labels.
pub const SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar (USD)"),
    ("BRL", "Brazilian Real (BRL)"),
    ("EUR", "Euro (EUR)"),
    ("GBP", "Pound Sterling (GBP)"),
    ("JPY", "Japanese Yen (JPY)"),
    ("CAD", "Canadian Dollar (CAD)"),
    ("AUD", "Australian Dollar (AUD)"),
    ("CHF", "Swiss Franc (CHF)"),
];

/// An upper-case, three letter ISO 4217 style currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn usd() -> Self {
        CurrencyCode("USD".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CurrencyCode(code))
        } else {
            Err(ConversionError::InvalidCurrency(s.trim().to_string()))
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
