//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, access log line per request)
//!     → metrics.rs (request counters/histograms, store error counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging through `tracing`; `RUST_LOG` overrides config
//! - Request ID flows from the request-id layer into the access log
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
