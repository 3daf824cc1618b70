//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request in
//!     → capture.rs (entry log line, exchange capture around the response body)
//!     → [validator writes status + body]
//!     → capture.rs (completion log line once the body is delivered)
//!     → metrics.rs (request counter, latency histogram)
//!
//! logging.rs installs the subscriber once at process start.
//! ```
//!
//! # Design Decisions
//! - Structured logging through `tracing`; JSON or pretty output
//! - Capture never buffers ahead of the transport
//! - Request ID flows into both log lines
//! - Metrics are cheap (atomic increments); exporter is opt-in

pub mod capture;
pub mod logging;
pub mod metrics;

pub use capture::{capture_exchange, CaptureBody, CapturedExchange, ExchangeRecord};
