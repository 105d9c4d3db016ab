//! Metrics collection and exposition.
//!
//! # Metrics
//! - `phonebook_requests_total` (counter): requests by method, route, status
//! - `phonebook_request_duration_seconds` (histogram): latency by method, route
//! - `phonebook_store_errors_total` (counter): store failures by backend, kind

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::config::StorageBackend;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    counter!(
        "phonebook_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "phonebook_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a failed store operation.
pub fn record_store_error(backend: StorageBackend, kind: &'static str) {
    counter!(
        "phonebook_store_errors_total",
        "backend" => backend.as_str(),
        "kind" => kind
    )
    .increment(1);
}
