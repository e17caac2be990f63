use super::AppState;
use super::page::{PageView, render_page};
use crate::core::conversion::{ConversionError, ConversionRequest, Severity};
use axum::{Form, extract::State, response::Html};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct ConvertForm {
    #[serde(default)]
    amount: String,
    #[serde(default, rename = "fromCurrency")]
    from_currency: String,
    #[serde(default, rename = "toCurrency")]
    to_currency: String,
}

pub async fn show_form() -> Html<String> {
    Html(render_page(&PageView::default()))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<ConvertForm>,
) -> Html<String> {
    let amount = form.amount.trim().to_string();
    let from_currency = form.from_currency.trim().to_uppercase();
    let to_currency = form.to_currency.trim().to_uppercase();

    let outcome = match ConversionRequest::from_input(&amount, &from_currency, &to_currency) {
        Ok(request) => state.resolver.resolve(&request).await,
        Err(e) => Err(e),
    };

    let message = match outcome {
        Ok(conversion) => {
            info!(provider = conversion.provider, "{}", conversion);
            (Severity::Success, conversion.to_string())
        }
        Err(e) => {
            match &e {
                ConversionError::Internal(detail) => {
                    error!(detail = %detail, "Conversion failed unexpectedly")
                }
                e if e.is_validation() => info!(error = %e, "Rejected conversion input"),
                e => warn!(error = %e, "Conversion failed"),
            }
            (e.severity(), e.to_string())
        }
    };

    Html(render_page(&PageView {
        amount,
        from_currency,
        to_currency,
        message: Some(message),
    }))
}
