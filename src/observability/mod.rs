//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder and server produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every forwarding log event
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
