//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define relay metrics (requests, trade stages, collaborator health)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `relay_requests_total` (counter): total requests by route, status
//! - `relay_request_duration_seconds` (histogram): latency distribution
//! - `relay_trade_stages_total` (counter): trades reaching each stage
//! - `relay_trade_failures_total` (counter): failed trades by kind
//! - `relay_backend_health` (gauge): 1=healthy, 0=unhealthy
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Labels for route, status code, stage, failure kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled HTTP request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    counter!(
        "relay_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!(
        "relay_request_duration_seconds",
        "route" => route.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}

/// Count a trade reaching a named workflow stage.
pub fn record_trade_stage(stage: &'static str) {
    counter!("relay_trade_stages_total", "stage" => stage).increment(1);
}

/// Count a failed trade by error kind.
pub fn record_trade_failure(kind: &'static str) {
    counter!("relay_trade_failures_total", "kind" => kind).increment(1);
}

/// Record collaborator health (chain RPC, ledger).
pub fn record_backend_health(backend: &'static str, healthy: bool) {
    gauge!("relay_backend_health", "backend" => backend).set(if healthy { 1.0 } else { 0.0 });
}
