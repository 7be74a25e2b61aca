//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout, plus an optional log file
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - One structured line per matched request (region, path, query, body preview)
//! - Request ID set on every request and echoed in the response
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
