//! HTTP endpoint server using Axum.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::metrics::Metrics;
use crate::pipeline::PipelineOrchestrator;
use crate::services::deepseek::DeepSeekClient;
use crate::services::kraken::KrakenProvider;
use crate::signals::SignalRequester;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub orchestrator: Arc<PipelineOrchestrator>,
    pub config: Arc<Config>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Wire the pipeline (Kraken provider, DeepSeek requester, orchestrator)
/// from configuration. Shared with the integration tests, which point the
/// upstream URLs at mock servers.
pub fn build_state(config: Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let provider = KrakenProvider::new(
        config.kraken_api_url.clone(),
        config.ohlc_interval_minutes,
        config.ohlc_window,
        config.fetch_timeout,
    )?;
    let client = DeepSeekClient::new(
        config.deepseek_api_url.clone(),
        config.deepseek_model.clone(),
        config.deepseek_api_key.clone(),
        config.generate_timeout,
    )?;
    let orchestrator = PipelineOrchestrator::new(
        Arc::new(provider),
        SignalRequester::new(client),
        config.pairs.clone(),
    );

    Ok(AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: Arc::new(Metrics::new()?),
        start_time: Arc::new(Instant::now()),
        orchestrator: Arc::new(orchestrator),
        config: Arc::new(config),
    })
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Trading Signal Generator API",
        "status": "active",
        "endpoints": {
            "health": "/health",
            "generate_signal": "/generate-signal",
            "available_pairs": "/pairs",
            "metrics": "/metrics"
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "signalforge-api"
    })))
}

async fn available_pairs(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "available_pairs": state.config.pairs,
        "default_pairs": state.config.pairs,
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[derive(Debug, Deserialize)]
struct SignalQuery {
    pair: Option<String>,
}

/// Run the pipeline for one request.
///
/// Fetch failures surface as a 500 with a descriptive detail message.
/// Generate failures never reach this layer: the pipeline wraps them into
/// a HOLD signal, so they come back as a normal success payload.
async fn generate_signal(
    State(state): State<AppState>,
    Query(query): Query<SignalQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.orchestrator.run(query.pair.as_deref()).await {
        Ok(result) => {
            info!(
                pair = %result.pair_used,
                direction = result.signal.direction.as_str(),
                count = result.sample_count,
                "signal generated"
            );
            state
                .metrics
                .signals_generated_total
                .with_label_values(&[result.signal.direction.as_str()])
                .inc();
            Ok(Json(json!({
                "success": true,
                "data": result.signal,
                "pair_used": result.pair_used,
                "ohlc_data_points": result.sample_count,
                "timestamp": Utc::now().to_rfc3339(),
                "timeframe": "1-week hourly data",
            })))
        }
        Err(e) => {
            error!(error = %e, "signal pipeline failed");
            state.metrics.fetch_failures_total.inc();
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "detail": format!("Error generating signal: {}", e),
                })),
            ))
        }
    }
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/pairs", get(available_pairs))
        .route("/generate-signal", get(generate_signal))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
