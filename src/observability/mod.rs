//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway decisions produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Every decision point logs the original message and relevant context
//! - Request ID from the HTTP layer is attached to the request span
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
