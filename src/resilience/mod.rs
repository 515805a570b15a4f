//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce request deadline)
//!     → On failure: surface to the caller, no retry
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Nothing is retried; retry policy belongs to the transport, if anywhere

pub mod timeouts;
