//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mock_requests_total` (counter): requests by outcome
//!   (`replayed`, `admin`, `not_found`, `bad_request`)
//! - `mock_request_duration_seconds` (histogram): handling latency
//! - `mock_regions` (gauge): live client regions
//! - `mock_history_entries_total` (counter): captured history entries

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(outcome: &'static str, start_time: Instant) {
    metrics::counter!("mock_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("mock_request_duration_seconds").record(start_time.elapsed().as_secs_f64());
}

pub fn record_region_count(count: usize) {
    metrics::gauge!("mock_regions").set(count as f64);
}

pub fn record_history_entry() {
    metrics::counter!("mock_history_entries_total").increment(1);
}
