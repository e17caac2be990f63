//! Conversion requests, results and the error taxonomy

use crate::core::amount::parse_amount;
use crate::core::currency::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use thiserror::Error;

const INVALID_AMOUNT: &str = "Invalid amount. Use only digits and a point or comma.";
const NON_POSITIVE_AMOUNT: &str = "Enter an amount greater than zero.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Please fill in all fields.")]
    MissingField(&'static str),
    #[error("{0}")]
    InvalidAmount(&'static str),
    #[error("Unknown currency code '{0}'. Use a three letter code such as USD.")]
    InvalidCurrency(String),
    #[error("Choose two different currencies to convert.")]
    SameCurrency,
    #[error("Currency '{0}' not found at the rate provider.")]
    MissingQuote(CurrencyCode),
    #[error("Failed to fetch exchange rate: {0}")]
    Provider(String),
    /// The payload is logged; users only ever see the generic message.
    #[error("Unexpected error while processing the conversion. Please try again.")]
    Internal(String),
}

impl ConversionError {
    pub(crate) fn invalid_amount() -> Self {
        ConversionError::InvalidAmount(INVALID_AMOUNT)
    }

    /// Whether the error was raised by input validation, before any
    /// network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConversionError::MissingField(_)
                | ConversionError::InvalidAmount(_)
                | ConversionError::InvalidCurrency(_)
                | ConversionError::SameCurrency
        )
    }

    pub fn severity(&self) -> Severity {
        if self.is_validation() {
            Severity::Warning
        } else {
            Severity::Danger
        }
    }
}

/// How a rendered outcome is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Success => "success",
                Severity::Warning => "warning",
                Severity::Danger => "danger",
            }
        )
    }
}

/// A validated conversion request: positive amount, distinct currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    source: CurrencyCode,
    target: CurrencyCode,
    amount: Decimal,
}

impl ConversionRequest {
    pub fn new(
        source: CurrencyCode,
        target: CurrencyCode,
        amount: Decimal,
    ) -> Result<Self, ConversionError> {
        if amount <= Decimal::ZERO {
            return Err(ConversionError::InvalidAmount(NON_POSITIVE_AMOUNT));
        }
        if source == target {
            return Err(ConversionError::SameCurrency);
        }
        Ok(ConversionRequest {
            source,
            target,
            amount,
        })
    }

    /// Builds a request from raw form text, checking fields in the order
    /// users see them reported: presence, amount, currency codes.
    pub fn from_input(amount: &str, source: &str, target: &str) -> Result<Self, ConversionError> {
        for (name, value) in [("amount", amount), ("fromCurrency", source), ("toCurrency", target)] {
            if value.trim().is_empty() {
                return Err(ConversionError::MissingField(name));
            }
        }

        let amount = parse_amount(amount)?;
        if amount <= Decimal::ZERO {
            return Err(ConversionError::InvalidAmount(NON_POSITIVE_AMOUNT));
        }

        let source: CurrencyCode = source.parse()?;
        let target: CurrencyCode = target.parse()?;
        Self::new(source, target, amount)
    }

    pub fn source(&self) -> &CurrencyCode {
        &self.source
    }

    pub fn target(&self) -> &CurrencyCode {
        &self.target
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// A successful conversion and the provider that priced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub request: ConversionRequest,
    pub converted: Decimal,
    pub provider: &'static str,
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            to_cents(self.request.amount),
            self.request.source,
            to_cents(self.converted),
            self.request.target
        )
    }
}

/// Rounds half away from zero to two decimal places.
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub type ConversionResult = Result<Conversion, ConversionError>;
