//! Rate sources and base-currency quote arithmetic

use crate::core::conversion::{ConversionError, ConversionRequest};
use crate::core::currency::CurrencyCode;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A source of quotes expressed against a single base currency.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_quotes(&self) -> Result<RateQuoteSet>;
}

/// A source that converts an amount directly, without exposing its rates.
#[async_trait]
pub trait ConversionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn convert(&self, request: &ConversionRequest) -> Result<Decimal>;
}

/// Quotes keyed by base-prefixed pair, e.g. `USDBRL`, as returned by a
/// single provider call.
#[derive(Debug, Clone)]
pub struct RateQuoteSet {
    base: CurrencyCode,
    quotes: HashMap<String, Decimal>,
}

impl RateQuoteSet {
    pub fn new(base: CurrencyCode, quotes: HashMap<String, Decimal>) -> Self {
        RateQuoteSet { base, quotes }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Units of `currency` per one unit of the base currency. Zero and
    /// negative quotes are treated as absent.
    pub fn quote(&self, currency: &CurrencyCode) -> Option<Decimal> {
        let pair = format!("{}{}", self.base, currency);
        self.quotes
            .get(&pair)
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }

    fn require(&self, currency: &CurrencyCode) -> Result<Decimal, ConversionError> {
        self.quote(currency)
            .ok_or_else(|| ConversionError::MissingQuote(currency.clone()))
    }

    /// Converts through the base currency.
    pub fn convert(&self, request: &ConversionRequest) -> Result<Decimal, ConversionError> {
        let (source, target, amount) = (request.source(), request.target(), request.amount());

        let converted = if *source == self.base {
            amount.checked_mul(self.require(target)?)
        } else if *target == self.base {
            amount.checked_div(self.require(source)?)
        } else {
            let from_rate = self.require(source)?;
            let to_rate = self.require(target)?;
            amount
                .checked_div(from_rate)
                .and_then(|in_base| in_base.checked_mul(to_rate))
        };

        match converted {
            Some(value) if value > Decimal::ZERO => Ok(value),
            Some(_) => Err(ConversionError::Internal(format!(
                "result underflowed converting {amount} {source} to {target}"
            ))),
            None => Err(ConversionError::Internal(format!(
                "decimal overflow converting {amount} {source} to {target}"
            ))),
        }
    }
}
