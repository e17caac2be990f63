use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Builds the HTTP client shared by a provider. Every request made through
/// it fails once `timeout` elapses; there are no retries.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("fxform/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Error object returned by APIs in the `{"success": false, "error": {...}}`
/// family.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<i64>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    pub info: Option<String>,
}

impl ApiErrorBody {
    pub fn describe(error: Option<&ApiErrorBody>) -> String {
        match error {
            Some(ApiErrorBody { info: Some(info), .. }) => info.clone(),
            Some(ApiErrorBody { kind: Some(kind), .. }) => kind.clone(),
            Some(ApiErrorBody { code: Some(code), .. }) => format!("API error code {code}"),
            _ => "Unknown error".to_string(),
        }
    }
}
