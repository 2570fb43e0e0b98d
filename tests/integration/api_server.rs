//! Integration tests for the API server.
//!
//! Kraken and DeepSeek are replaced with wiremock servers; the router and
//! pipeline wiring are the real thing.


use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use test_utils::*;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApp::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "signalforge-api");
}

#[tokio::test]
async fn root_endpoint_lists_available_endpoints() {
    let app = TestApp::new().await;
    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "active");
    assert_eq!(body["endpoints"]["generate_signal"], "/generate-signal");
}

#[tokio::test]
async fn pairs_endpoint_returns_configured_candidates() {
    let app = TestApp::new().await;
    let response = app.server.get("/pairs").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let pairs = body["available_pairs"].as_array().unwrap();
    assert_eq!(pairs[0], "XBTUSD");
    assert_eq!(pairs.len(), 4);
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApp::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
}

#[tokio::test]
async fn generate_signal_returns_model_signal() {
    let app = TestApp::new().await;
    mock_kraken_any_pair(&app.kraken, "XXBTZUSD", &[100.0, 105.0, 110.0]).await;
    mock_deepseek_content(
        &app.deepseek,
        r#"{"signal":"BUY","reason":"uptrend with rising volume","confidence":0.7}"#,
    )
    .await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["signal"], "BUY");
    assert_eq!(body["data"]["confidence"], 0.7);
    assert_eq!(body["pair_used"], "XXBTZUSD");
    assert_eq!(body["ohlc_data_points"], 3);
    assert_eq!(body["timeframe"], "1-week hourly data");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn generate_signal_extracts_json_from_prose() {
    let app = TestApp::new().await;
    mock_kraken_any_pair(&app.kraken, "XXBTZUSD", &[100.0, 95.0]).await;
    mock_deepseek_content(
        &app.deepseek,
        r#"Here is my answer: {"signal":"SELL","reason":"breakdown","confidence":0.4} thanks"#,
    )
    .await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["data"]["signal"], "SELL");
    assert_eq!(body["data"]["confidence"], 0.4);
}

#[tokio::test]
async fn generate_signal_with_explicit_pair_probes_only_that_pair() {
    let app = TestApp::new().await;
    mock_kraken_pair(
        &app.kraken,
        "XBTUSDT",
        ResponseTemplate::new(200).set_body_json(kraken_ohlc_body("XBTUSDT", &[100.0, 101.0])),
    )
    .await;
    mock_deepseek_content(
        &app.deepseek,
        r#"{"signal":"HOLD","reason":"choppy","confidence":0.3}"#,
    )
    .await;

    let response = app.server.get("/generate-signal?pair=XBTUSDT").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["pair_used"], "XBTUSDT");
    // Only the explicit pair was requested upstream.
    let requests = app.kraken.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn generate_signal_falls_back_to_next_candidate() {
    let app = TestApp::new().await;
    // First candidate is unknown upstream; second resolves under an alias.
    mock_kraken_pair(
        &app.kraken,
        "XBTUSD",
        ResponseTemplate::new(200).set_body_json(kraken_unknown_pair_body()),
    )
    .await;
    mock_kraken_pair(
        &app.kraken,
        "XXBTZUSD",
        ResponseTemplate::new(200).set_body_json(kraken_ohlc_body("XXBTZUSD", &[100.0, 102.0])),
    )
    .await;
    mock_deepseek_content(
        &app.deepseek,
        r#"{"signal":"BUY","reason":"recovery","confidence":0.6}"#,
    )
    .await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["pair_used"], "XXBTZUSD");
    let requests = app.kraken.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2, "must stop at the first working candidate");
}

#[tokio::test]
async fn non_success_status_advances_to_next_candidate() {
    let app = TestApp::new().await;
    // First candidate's endpoint is down; the probe moves on instead of
    // failing the whole fetch.
    mock_kraken_pair(&app.kraken, "XBTUSD", ResponseTemplate::new(502)).await;
    mock_kraken_pair(
        &app.kraken,
        "XXBTZUSD",
        ResponseTemplate::new(200).set_body_json(kraken_ohlc_body("XXBTZUSD", &[100.0, 101.0])),
    )
    .await;
    mock_deepseek_content(
        &app.deepseek,
        r#"{"signal":"HOLD","reason":"flat","confidence":0.3}"#,
    )
    .await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["pair_used"], "XXBTZUSD");
    let requests = app.kraken.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn all_candidates_unknown_yields_server_error() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kraken_unknown_pair_body()))
        .mount(&app.kraken)
        .await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("no OHLC data available"), "{detail}");

    // All four candidates were probed, and DeepSeek was never consulted.
    let kraken_requests = app.kraken.received_requests().await.unwrap();
    assert_eq!(kraken_requests.len(), 4);
    let deepseek_requests = app.deepseek.received_requests().await.unwrap();
    assert!(deepseek_requests.is_empty());
}

#[tokio::test]
async fn fatal_upstream_error_aborts_candidate_iteration() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "error": ["EGeneral:Invalid arguments"] })),
        )
        .mount(&app.kraken)
        .await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("EGeneral:Invalid arguments"), "{detail}");

    let requests = app.kraken.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "fatal error must not advance to later candidates");
}

#[tokio::test]
async fn completion_failure_degrades_to_hold() {
    let app = TestApp::new().await;
    mock_kraken_any_pair(&app.kraken, "XXBTZUSD", &[100.0, 101.0]).await;
    mock_deepseek_failure(&app.deepseek, 500).await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200, "generate failures never fail the request");

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["signal"], "HOLD");
    assert_eq!(body["data"]["confidence"], 0.1);
    let reason = body["data"]["reason"].as_str().unwrap();
    assert!(reason.contains("API error: 500"), "{reason}");
}

#[tokio::test]
async fn unparsable_completion_degrades_to_hold() {
    let app = TestApp::new().await;
    mock_kraken_any_pair(&app.kraken, "XXBTZUSD", &[100.0, 101.0]).await;
    mock_deepseek_content(&app.deepseek, "I cannot provide financial advice.").await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["data"]["signal"], "HOLD");
    assert_eq!(body["data"]["confidence"], 0.1);
    assert_eq!(body["data"]["reason"], "Failed to parse AI response");
}

#[tokio::test]
async fn missing_credential_degrades_to_hold_without_calling_upstream() {
    let app = TestApp::without_credential().await;
    mock_kraken_any_pair(&app.kraken, "XXBTZUSD", &[100.0, 101.0]).await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["data"]["signal"], "HOLD");
    assert_eq!(body["data"]["confidence"], 0.1);
    assert_eq!(body["data"]["reason"], "API key not configured");

    let deepseek_requests = app.deepseek.received_requests().await.unwrap();
    assert!(deepseek_requests.is_empty(), "no traffic without a credential");
}

#[tokio::test]
async fn prompt_embeds_series_summary_and_pair() {
    let app = TestApp::new().await;
    mock_kraken_any_pair(&app.kraken, "XXBTZUSD", &[100.0, 110.0]).await;
    mock_deepseek_content(
        &app.deepseek,
        r#"{"signal":"BUY","reason":"up","confidence":0.5}"#,
    )
    .await;

    let response = app.server.get("/generate-signal").await;
    assert_eq!(response.status_code(), 200);

    let requests = app.deepseek.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request: Value = requests[0].body_json().unwrap();
    assert_eq!(request["model"], "deepseek-chat");
    assert_eq!(request["temperature"], 0.1);
    assert_eq!(request["max_tokens"], 500);
    let prompt = request["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("XXBTZUSD"));
    assert!(prompt.contains("Current price: 110.00"));
    assert!(prompt.contains("10.00%"));
    assert!(prompt.contains("Respond ONLY with a valid JSON object"));
}

#[tokio::test]
async fn explicit_unknown_pair_does_not_fall_back_to_candidates() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .and(query_param("pair", "NOPE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kraken_unknown_pair_body()))
        .mount(&app.kraken)
        .await;

    let response = app.server.get("/generate-signal?pair=NOPE").await;
    assert_eq!(response.status_code(), 500);

    let requests = app.kraken.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}
