//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define proxy metrics (requests, latency, upstream errors)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `proxy_requests_total` (counter): forwarded requests by method, status, upstream
//! - `proxy_request_duration_seconds` (histogram): time until upstream headers arrive
//! - `proxy_upstream_errors_total` (counter): transport failures by kind, upstream
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Labels for method, status code, upstream authority

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a request that received an upstream response.
pub fn record_request(method: &str, status: u16, upstream: &str, start_time: Instant) {
    let elapsed = start_time.elapsed().as_secs_f64();

    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "upstream" => upstream.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "proxy_request_duration_seconds",
        "method" => method.to_string(),
        "upstream" => upstream.to_string()
    )
    .record(elapsed);
}

/// Record a transport failure.
pub fn record_upstream_error(kind: &'static str, upstream: &str) {
    metrics::counter!(
        "proxy_upstream_errors_total",
        "kind" => kind,
        "upstream" => upstream.to_string()
    )
    .increment(1);
}
