//! Outbound transport subsystem.
//!
//! # Data Flow
//! ```text
//! Request<ForwardBody>
//!     → Transport::send (connection pool, framing, timeouts)
//!     → Response<Body> (headers eager, body streamed)
//! ```
//!
//! # Design Decisions
//! - The transport is a black box behind a single trait
//! - Created once, shared by every request (internally thread-safe)
//! - Never follows redirects
//! - Dropping the returned future cancels the call

pub mod client;
pub mod error;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;

use crate::http::body::ForwardBody;

pub use client::{
    default_tls_config, tls_config_with_roots, ClientBuilder, HyperTransport, TransportHook,
    TransportSettings,
};
pub use error::TransportError;

/// Future returned by [`Transport::send`].
pub type TransportFuture = BoxFuture<'static, Result<Response<Body>, TransportError>>;

/// Sends one outbound request and resolves to the upstream response.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: Request<ForwardBody>) -> TransportFuture;
}
