use super::util::{ApiErrorBody, build_client};
use crate::core::conversion::ConversionRequest;
use crate::core::rates::ConversionProvider;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Direct conversions from an exchangerate.host compatible `convert`
/// endpoint. No access key is sent.
pub struct ExchangeRateHostProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateHostProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(ExchangeRateHostProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    success: Option<bool>,
    result: Option<Decimal>,
    error: Option<ApiErrorBody>,
}

#[async_trait]
impl ConversionProvider for ExchangeRateHostProvider {
    fn name(&self) -> &'static str {
        "exchangerate.host"
    }

    #[instrument(
        name = "ExchangeRateHostConvert",
        skip(self, request),
        fields(from = %request.source(), to = %request.target())
    )]
    async fn convert(&self, request: &ConversionRequest) -> Result<Decimal> {
        let url = format!("{}/convert", self.base_url);
        let amount = request.amount().to_string();
        debug!("Requesting conversion from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("from", request.source().as_str()),
                ("to", request.target().as_str()),
                ("amount", amount.as_str()),
            ])
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e.without_url(), url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} from exchangerate.host",
                response.status()
            ));
        }

        let text = response.text().await?;
        let data: ConvertResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse exchangerate.host response: {}", e))?;

        match data {
            ConvertResponse {
                success: Some(false),
                error,
                ..
            }
            | ConvertResponse {
                result: None,
                error,
                ..
            } => Err(anyhow!(ApiErrorBody::describe(error.as_ref()))),
            ConvertResponse {
                result: Some(result),
                ..
            } => Ok(result),
        }
    }
}
