//! Observability utilities for the event normalization platform.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Metric descriptions for normalization and replay operations
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{counter, init_metrics};
//!
//! // Initialize metrics recorder once at startup
//! init_metrics();
//!
//! // Record normalization outcomes
//! counter!("normalization_events_total", "outcome" => "applied").increment(1);
//! ```

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// This should be called once at application startup.
/// Returns the PrometheusHandle for rendering metrics.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("Failed to install Prometheus recorder");

        info!("Prometheus metrics recorder initialized");

        register_metric_descriptions();

        handle
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Render current metrics in Prometheus exposition format
pub fn render_metrics() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Register metric descriptions for documentation
fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    describe_counter!(
        "normalization_events_total",
        "Normalized raw events by outcome (applied, skipped, failed)"
    );
    describe_counter!(
        "normalization_unmatched_total",
        "Raw events with no matching handler, by category"
    );
    describe_counter!(
        "replay_batches_total",
        "Raw event pages fetched during batch replay"
    );
    describe_histogram!(
        "replay_duration_seconds",
        "Wall-clock duration of a full replay run"
    );
}
