//! The conversion form served over HTTP

mod form;
pub mod page;

use crate::core::config::AppConfig;
use crate::core::conversion::{ConversionError, Severity};
use crate::core::resolver::RateResolver;
use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Router, routing::get};
use page::{PageView, render_page};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RateResolver>,
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::show_form).post(form::submit_form))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Renders the form with the generic internal error. The panic payload is
/// only logged.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "Request handler panicked");

    let view = PageView {
        message: Some((
            Severity::Danger,
            ConversionError::Internal(detail).to_string(),
        )),
        ..PageView::default()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Html(render_page(&view))).into_response()
}

pub async fn run_server(config: &AppConfig) -> Result<()> {
    let state = AppState {
        resolver: Arc::new(RateResolver::from_config(config)?),
    };
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Listening on http://{}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
