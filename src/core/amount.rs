//! Parsing of user supplied amounts

use crate::core::conversion::ConversionError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a decimal amount, accepting either a comma or a point as the
/// decimal separator.
pub fn parse_amount(text: &str) -> Result<Decimal, ConversionError> {
    let normalized = text.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| ConversionError::invalid_amount())
}
