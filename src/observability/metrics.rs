//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define pipeline metrics (decisions, auth failures, locale sources)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by `decision` (public, allowed, rejected, invalid_path)
//! - `edge_auth_failures_total` (counter): gate failures by `reason`
//! - `edge_locale_resolutions_total` (counter): resolutions by `source`
//! - `edge_verify_duration_seconds` (histogram): verifier latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests need no setup
//! - Label values are static strings to keep cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_decision(decision: &'static str) {
    metrics::counter!("edge_requests_total", "decision" => decision).increment(1);
}

pub fn record_auth_failure(reason: &'static str) {
    metrics::counter!("edge_auth_failures_total", "reason" => reason).increment(1);
}

pub fn record_locale(source: &'static str) {
    metrics::counter!("edge_locale_resolutions_total", "source" => source).increment(1);
}

pub fn record_verify_duration(start: Instant) {
    metrics::histogram!("edge_verify_duration_seconds").record(start.elapsed().as_secs_f64());
}
