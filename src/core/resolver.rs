//! Resolves a conversion against the primary quote provider, falling back
//! to a direct conversion provider when the primary is unconfigured or fails.

use crate::core::config::AppConfig;
use crate::core::conversion::{Conversion, ConversionError, ConversionRequest, ConversionResult};
use crate::core::rates::{ConversionProvider, QuoteProvider};
use crate::providers::currencylayer::CurrencyLayerProvider;
use crate::providers::exchangerate_host::ExchangeRateHostProvider;
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

pub struct RateResolver {
    primary: Option<Box<dyn QuoteProvider>>,
    fallback: Box<dyn ConversionProvider>,
}

impl RateResolver {
    pub fn new(
        primary: Option<Box<dyn QuoteProvider>>,
        fallback: Box<dyn ConversionProvider>,
    ) -> Self {
        RateResolver { primary, fallback }
    }

    /// Builds the providers described by `config`. The primary provider is
    /// only enabled when an API key is present.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = config.timeout();
        let providers = &config.providers;

        let primary: Option<Box<dyn QuoteProvider>> = match providers.currencylayer.api_key() {
            Some(key) => Some(Box::new(CurrencyLayerProvider::new(
                &providers.currencylayer.base_url,
                key,
                timeout,
            )?)),
            None => {
                info!("No currencylayer API key configured; using the fallback provider only");
                None
            }
        };
        let fallback = Box::new(ExchangeRateHostProvider::new(
            &providers.exchangerate_host.base_url,
            timeout,
        )?);

        Ok(Self::new(primary, fallback))
    }

    #[instrument(
        name = "ResolveConversion",
        skip(self, request),
        fields(from = %request.source(), to = %request.target(), amount = %request.amount())
    )]
    pub async fn resolve(&self, request: &ConversionRequest) -> ConversionResult {
        if let Some(primary) = &self.primary {
            match Self::resolve_primary(primary.as_ref(), request).await {
                Ok(conversion) => return Ok(conversion),
                Err(e) => warn!(
                    provider = primary.name(),
                    error = %e,
                    "Primary provider failed, trying fallback"
                ),
            }
        }

        let provider = self.fallback.name();
        match self.fallback.convert(request).await {
            Ok(converted) if converted <= Decimal::ZERO => {
                warn!(provider, %converted, "Fallback returned a non-positive amount");
                Err(ConversionError::Provider(format!(
                    "invalid conversion result {converted}"
                )))
            }
            Ok(converted) => {
                debug!(provider, %converted, "Fallback conversion succeeded");
                Ok(Conversion {
                    request: request.clone(),
                    converted,
                    provider,
                })
            }
            Err(e) => {
                warn!(provider, error = ?e, "Fallback provider failed");
                Err(ConversionError::Provider(e.to_string()))
            }
        }
    }

    async fn resolve_primary(
        primary: &dyn QuoteProvider,
        request: &ConversionRequest,
    ) -> std::result::Result<Conversion, String> {
        let quotes = primary.fetch_quotes().await.map_err(|e| format!("{e:#}"))?;
        let converted = quotes.convert(request).map_err(|e| match e {
            ConversionError::Internal(detail) => detail,
            other => other.to_string(),
        })?;
        debug!(provider = primary.name(), %converted, "Primary conversion succeeded");
        Ok(Conversion {
            request: request.clone(),
            converted,
            provider: primary.name(),
        })
    }
}
