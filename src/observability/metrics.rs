//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by status tag and HTTP code
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency by status tag
//! - `gateway_backend_calls_total` (counter): downstream calls by outcome
//! - `gateway_backend_duration_seconds` (histogram): downstream latency

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::gateway::Outcome;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Count an inbound request by outcome, without latency.
pub fn record_outcome(outcome: Outcome) {
    let code = outcome.status_code().as_u16().to_string();
    metrics::counter!("gateway_requests_total", "status" => outcome.as_str(), "code" => code)
        .increment(1);
}

/// Record a finished inbound request.
pub fn record_request(outcome: Outcome, start: Instant) {
    record_outcome(outcome);
    metrics::histogram!("gateway_request_duration_seconds", "status" => outcome.as_str())
        .record(start.elapsed().as_secs_f64());
}

/// Record one downstream call.
pub fn record_backend_call(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("gateway_backend_calls_total", "outcome" => outcome).increment(1);
    metrics::histogram!("gateway_backend_duration_seconds").record(elapsed.as_secs_f64());
}
