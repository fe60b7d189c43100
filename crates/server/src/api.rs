//! HTTP API: the prediction route plus health and Prometheus metrics

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use obesity_core::{ObesityPipeline, PatientRecord};
use prometheus::{Encoder, TextEncoder};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::metrics::ServerMetrics;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ObesityPipeline>,
    pub metrics: ServerMetrics,
}

impl AppState {
    pub fn new(pipeline: Arc<ObesityPipeline>, metrics: ServerMetrics) -> Self {
        Self { pipeline, metrics }
    }
}

/// Prediction endpoint
///
/// Validation failures come back as 400 with the aggregated field detail;
/// everything else that goes wrong is a 500 with the detail logged
/// server-side. A failing request never takes the process down.
async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let start = Instant::now();

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            state.metrics.inc_validation_errors();
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid JSON body: {rejection}") })),
            );
        }
    };

    let record = match PatientRecord::from_json(&payload) {
        Ok(record) => record,
        Err(validation) => {
            state.metrics.inc_validation_errors();
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": validation.to_string() })),
            );
        }
    };

    match state.pipeline.predict(&record) {
        Ok(prediction) => {
            state
                .metrics
                .observe_prediction_latency(start.elapsed().as_secs_f64());
            state.metrics.inc_predictions_served();
            (
                StatusCode::OK,
                Json(json!({ "status": 200, "data": { "prediction": prediction } })),
            )
        }
        Err(e) => {
            state.metrics.inc_prediction_errors();
            error!(error = %e, "Prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("internal error: {e}") })),
            )
        }
    }
}

/// Health check response - the pipeline is a startup precondition, so a
/// serving process is a healthy process
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "pipeline": {
            "params": state.pipeline.metadata.params.to_string(),
            "test_accuracy": state.pipeline.metadata.test_accuracy,
        }
    }))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
