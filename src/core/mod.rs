//! Core business logic abstractions

pub mod amount;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod log;
pub mod rates;
pub mod resolver;

// Re-export main types for cleaner imports
pub use amount::parse_amount;
pub use conversion::{Conversion, ConversionError, ConversionRequest, ConversionResult, Severity};
pub use currency::CurrencyCode;
pub use rates::{ConversionProvider, QuoteProvider, RateQuoteSet};
pub use resolver::RateResolver;
