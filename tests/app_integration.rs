use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use fxform::core::config::AppConfig;
use fxform::core::resolver::RateResolver;
use fxform::web::{AppState, app_router};
use std::fs;
use std::sync::Arc;
use tower::ServiceExt;
use tracing::info;

// Mock upstream rate providers
mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_currencylayer_mock(mock_response: &str, expected_calls: u64) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/live"))
            .and(query_param("access_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_exchangerate_mock(mock_response: &str, expected_calls: u64) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/convert"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mock_server
    }
}

const USD_QUOTES: &str = r#"{
    "success": true,
    "source": "USD",
    "quotes": {"USDBRL": 5.2, "USDEUR": 0.92}
}"#;

fn config_for(
    primary: &wiremock::MockServer,
    fallback: &wiremock::MockServer,
    api_key: Option<&str>,
) -> AppConfig {
    let mut config = AppConfig::default();
    config.timeout_secs = 5;
    config.providers.currencylayer.base_url = primary.uri();
    config.providers.currencylayer.api_key = api_key.map(str::to_string);
    config.providers.exchangerate_host.base_url = fallback.uri();
    config
}

fn router_for(config: &AppConfig) -> axum::Router {
    let resolver = RateResolver::from_config(config).expect("Failed to build resolver");
    app_router(AppState {
        resolver: Arc::new(resolver),
    })
}

async fn post_form(app: axum::Router, body: &str) -> String {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_get_renders_empty_form() {
    let primary = test_utils::create_currencylayer_mock(USD_QUOTES, 0).await;
    let fallback = test_utils::create_exchangerate_mock(r#"{"result": 1}"#, 0).await;
    let app = router_for(&config_for(&primary, &fallback, Some("test-key")));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<form method=\"post\" action=\"/\">"));
    assert!(!html.contains("role=\"alert\""));
}

#[test_log::test(tokio::test)]
async fn test_primary_provider_conversion() {
    let primary = test_utils::create_currencylayer_mock(USD_QUOTES, 1).await;
    let fallback = test_utils::create_exchangerate_mock(r#"{"result": 1}"#, 0).await;
    let app = router_for(&config_for(&primary, &fallback, Some("test-key")));

    let html = post_form(app, "amount=100&fromCurrency=usd&toCurrency=brl").await;
    info!("Rendered page: {html}");
    assert!(html.contains("alert-success"));
    assert!(html.contains("100.00 USD = 520.00 BRL"));
    assert!(html.contains("value=\"100\""));
    assert!(html.contains("<option value=\"USD\" selected>"));
}

#[test_log::test(tokio::test)]
async fn test_cross_rate_with_comma_amount() {
    let primary = test_utils::create_currencylayer_mock(USD_QUOTES, 1).await;
    let fallback = test_utils::create_exchangerate_mock(r#"{"result": 1}"#, 0).await;
    let app = router_for(&config_for(&primary, &fallback, Some("test-key")));

    let html = post_form(app, "amount=10%2C00&fromCurrency=EUR&toCurrency=BRL").await;
    assert!(html.contains("10.00 EUR = 56.52 BRL"));
    assert!(html.contains("value=\"10,00\""));
}

#[test_log::test(tokio::test)]
async fn test_missing_quote_uses_fallback() {
    let primary = test_utils::create_currencylayer_mock(USD_QUOTES, 1).await;
    let fallback =
        test_utils::create_exchangerate_mock(r#"{"success": true, "result": 7.31}"#, 1).await;
    let app = router_for(&config_for(&primary, &fallback, Some("test-key")));

    let html = post_form(app, "amount=1&fromCurrency=GBP&toCurrency=BRL").await;
    assert!(html.contains("alert-success"));
    assert!(html.contains("1.00 GBP = 7.31 BRL"));
}

#[test_log::test(tokio::test)]
async fn test_unconfigured_primary_goes_to_fallback() {
    let primary = test_utils::create_currencylayer_mock(USD_QUOTES, 0).await;
    let fallback = test_utils::create_exchangerate_mock(r#"{"result": 520}"#, 1).await;
    let app = router_for(&config_for(&primary, &fallback, None));

    let html = post_form(app, "amount=100&fromCurrency=USD&toCurrency=BRL").await;
    assert!(html.contains("100.00 USD = 520.00 BRL"));
}

#[test_log::test(tokio::test)]
async fn test_validation_errors_skip_network() {
    let primary = test_utils::create_currencylayer_mock(USD_QUOTES, 0).await;
    let fallback = test_utils::create_exchangerate_mock(r#"{"result": 1}"#, 0).await;
    let app = router_for(&config_for(&primary, &fallback, Some("test-key")));

    let cases = [
        ("amount=0&fromCurrency=USD&toCurrency=BRL", "Enter an amount greater than zero."),
        ("amount=-3&fromCurrency=USD&toCurrency=BRL", "Enter an amount greater than zero."),
        ("amount=abc&fromCurrency=USD&toCurrency=BRL", "Invalid amount."),
        ("amount=10&fromCurrency=USD&toCurrency=usd", "Choose two different currencies"),
        ("amount=10&fromCurrency=USD", "Please fill in all fields."),
        ("amount=10&fromCurrency=DOLLAR&toCurrency=BRL", "Unknown currency code"),
    ];
    for (body, expected) in cases {
        let html = post_form(app.clone(), body).await;
        assert!(html.contains("alert-warning"), "expected warning for {body}");
        assert!(html.contains(expected), "expected {expected:?} for {body}");
    }
}

#[test_log::test(tokio::test)]
async fn test_both_providers_failing() {
    let primary = test_utils::create_currencylayer_mock(
        r#"{"success": false, "error": {"code": 104, "info": "Monthly usage limit reached."}}"#,
        1,
    )
    .await;
    let fallback = test_utils::create_exchangerate_mock(
        r#"{"success": false, "error": {"info": "Service temporarily unavailable."}}"#,
        1,
    )
    .await;
    let app = router_for(&config_for(&primary, &fallback, Some("test-key")));

    let html = post_form(app, "amount=100&fromCurrency=USD&toCurrency=BRL").await;
    assert!(html.contains("alert-danger"));
    assert!(html.contains("Failed to fetch exchange rate: Service temporarily unavailable."));
    assert!(!html.contains("Monthly usage limit"));
}

#[test_log::test(tokio::test)]
async fn test_cli_convert_with_config_file() {
    let primary = test_utils::create_currencylayer_mock(USD_QUOTES, 0).await;
    let fallback = test_utils::create_exchangerate_mock(r#"{"result": 19.23}"#, 1).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        timeout_secs: 5
        providers:
          currencylayer:
            base_url: {}
          exchangerate_host:
            base_url: {}
    "#,
        primary.uri(),
        fallback.uri()
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = fxform::run_command(
        fxform::AppCommand::Convert {
            amount: "100".to_string(),
            from: "BRL".to_string(),
            to: "USD".to_string(),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_cli_convert_rejects_invalid_amount() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), "timeout_secs: 1").expect("Failed to write config file");

    let result = fxform::run_command(
        fxform::AppCommand::Convert {
            amount: "ten".to_string(),
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    let err = result.expect_err("invalid amount should fail");
    assert!(err.to_string().starts_with("Invalid amount."));
}
