//! Metrics collection and exposition.
//!
//! # Metrics
//! - `receipt_requests_total` (counter): completed exchanges by status
//! - `receipt_request_duration_seconds` (histogram): entry to last body byte
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "receipt_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "receipt_request_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(address = %addr, error = %error, "Failed to install metrics exporter"),
    }
}

/// Record one completed exchange.
pub fn record_exchange(status: u16, elapsed: Duration) {
    metrics::counter!(REQUESTS_TOTAL, "status" => status.to_string()).increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS).record(elapsed.as_secs_f64());
}
