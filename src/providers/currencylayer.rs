use super::util::{ApiErrorBody, build_client};
use crate::core::currency::CurrencyCode;
use crate::core::rates::{QuoteProvider, RateQuoteSet};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument};

/// Live quotes from currencylayer. The free plan only quotes against USD.
pub struct CurrencyLayerProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl CurrencyLayerProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(CurrencyLayerProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LiveResponse {
    success: bool,
    source: Option<String>,
    #[serde(default, deserialize_with = "usable_quotes")]
    quotes: HashMap<String, Decimal>,
    error: Option<ApiErrorBody>,
}

/// Keeps the quotes that fit in a `Decimal`; one exotic rate must not
/// discard the whole response.
fn usable_quotes<'de, D>(deserializer: D) -> std::result::Result<HashMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(pair, value)| match parse_quote(&value) {
            Some(rate) => Some((pair, rate)),
            None => {
                debug!(%pair, %value, "Skipping unusable quote");
                None
            }
        })
        .collect())
}

fn parse_quote(value: &Value) -> Option<Decimal> {
    let text = value.as_number()?.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[async_trait]
impl QuoteProvider for CurrencyLayerProvider {
    fn name(&self) -> &'static str {
        "currencylayer"
    }

    #[instrument(name = "CurrencyLayerLive", skip(self))]
    async fn fetch_quotes(&self) -> Result<RateQuoteSet> {
        let url = format!("{}/live", self.base_url);
        debug!("Requesting live quotes from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("access_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e.without_url(), url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from currencylayer", response.status()));
        }

        let text = response.text().await?;
        let data: LiveResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse currencylayer response: {}", e))?;

        if !data.success {
            return Err(anyhow!(ApiErrorBody::describe(data.error.as_ref())));
        }

        let base = match data.source.as_deref() {
            Some(source) => source.parse::<CurrencyCode>()?,
            None => CurrencyCode::usd(),
        };
        debug!(%base, count = data.quotes.len(), "Received quotes");
        Ok(RateQuoteSet::new(base, data.quotes))
    }
}
