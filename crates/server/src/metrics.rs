//! Prometheus metrics for the prediction service

use prometheus::{
    register_gauge_vec, register_histogram, register_int_gauge, GaugeVec, Histogram, IntGauge,
};
use std::sync::OnceLock;

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServerMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct ServerMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_served: IntGauge,
    validation_errors: IntGauge,
    prediction_errors: IntGauge,
    pipeline_info: GaugeVec,
}

impl ServerMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "obesity_server_prediction_latency_seconds",
                "Time spent validating and predicting one request",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_served: register_int_gauge!(
                "obesity_server_predictions_served_total",
                "Total number of successful predictions"
            )
            .expect("Failed to register predictions_served"),

            validation_errors: register_int_gauge!(
                "obesity_server_validation_errors_total",
                "Total number of requests rejected by schema validation"
            )
            .expect("Failed to register validation_errors"),

            prediction_errors: register_int_gauge!(
                "obesity_server_prediction_errors_total",
                "Total number of requests that failed inside the pipeline"
            )
            .expect("Failed to register prediction_errors"),

            pipeline_info: register_gauge_vec!(
                "obesity_server_pipeline_info",
                "Information about the currently loaded pipeline",
                &["params"]
            )
            .expect("Failed to register pipeline_info"),
        }
    }
}

/// Metrics handle for the prediction service
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct ServerMetrics {
    _private: (),
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServerMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record the latency of one prediction request
    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner()
            .prediction_latency_seconds
            .observe(duration_secs);
    }

    /// Increment successful predictions counter
    pub fn inc_predictions_served(&self) {
        self.inner().predictions_served.inc();
    }

    /// Increment validation failures counter
    pub fn inc_validation_errors(&self) {
        self.inner().validation_errors.inc();
    }

    /// Increment pipeline failures counter
    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors.inc();
    }

    /// Describe the loaded pipeline
    pub fn set_pipeline_info(&self, params: &str) {
        self.inner().pipeline_info.reset();
        self.inner()
            .pipeline_info
            .with_label_values(&[params])
            .set(1.0);
    }
}
