//! Forwarding core.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → routing::PrefixMatcher (prefix + method map)
//!         → no match: Outcome::NotHandled (caller continues the chain)
//!     → http::request (translate: URI, headers, streaming body)
//!     → Transport::send
//!     → http::response (relay: status, headers, streaming body)
//!     → Outcome::Relayed
//! ```
//!
//! # Design Decisions
//! - One stateless forwarder per local prefix; clones share the route and transport
//! - The upstream call is the only suspension point before the relay
//! - Dropping the forwarding future cancels the upstream call
//! - Failures are surfaced, never retried

pub mod error;
pub mod middleware;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::config::{ConfigError, TimeoutConfig, ValidationError};
use crate::http::request::{request_id, OutboundRequest};
use crate::http::response::relay;
use crate::observability::metrics;
use crate::routing::Route;
use crate::transport::{HyperTransport, Transport, TransportHook};

pub use error::ForwardError;
pub use middleware::{forward_middleware, ReverseProxyExt};

/// What happened to a request offered to a [`Forwarder`].
#[derive(Debug)]
pub enum Outcome {
    /// The request was forwarded; this is the relayed upstream response.
    Relayed(Response<Body>),
    /// The request is outside this forwarder's prefix or method map.
    NotHandled(Request<Body>),
}

/// Forwards requests under one local prefix to one upstream origin.
#[derive(Clone)]
pub struct Forwarder {
    route: Arc<Route>,
    transport: Arc<dyn Transport>,
}

impl Forwarder {
    /// Create a forwarder backed by the pooled hyper transport.
    ///
    /// The path of `upstream` becomes the base path of every forwarded
    /// request. `hook` may adjust the transport before it is built.
    pub fn new(
        local_path: &str,
        upstream: &str,
        hook: Option<TransportHook>,
    ) -> Result<Self, ConfigError> {
        if local_path.trim().is_empty() {
            return Err(ConfigError::Validation(vec![ValidationError::EmptyLocalPath {
                route: upstream.to_string(),
            }]));
        }

        let route = Route::new(local_path, upstream).map_err(|source| ConfigError::Upstream {
            upstream: upstream.to_string(),
            source,
        })?;
        let transport = HyperTransport::new(&TimeoutConfig::default(), hook)?;

        Ok(Self::with_transport(route, Arc::new(transport)))
    }

    /// Create a forwarder over an existing transport.
    pub fn with_transport(route: Route, transport: Arc<dyn Transport>) -> Self {
        Self {
            route: Arc::new(route),
            transport,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Forward `request` if it matches, otherwise hand it back untouched.
    pub async fn forward(&self, request: Request<Body>) -> Result<Outcome, ForwardError> {
        let Some(matched) = self
            .route
            .matcher
            .match_request(request.method(), request.uri().path())
        else {
            return Ok(Outcome::NotHandled(request));
        };

        let entry = matched.entry;
        let target = self
            .route
            .upstream
            .target_uri(matched.remainder, request.uri().query())?;

        let start_time = Instant::now();
        let method = entry.method.as_str();
        let upstream = self.route.upstream.authority().as_str();
        let request_id = request_id(request.headers()).to_string();

        tracing::debug!(
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
            target_uri = %target,
            "Forwarding request"
        );

        let outbound = OutboundRequest::from_inbound(request, target.clone(), entry).into_http()?;

        match self.transport.send(outbound).await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(
                    request_id = %request_id,
                    status = %status,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                metrics::record_request(method, status.as_u16(), upstream, start_time);
                Ok(Outcome::Relayed(relay(response, &target)))
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    target_uri = %target,
                    error = %e,
                    "Upstream request failed"
                );
                metrics::record_upstream_error(e.kind(), upstream);
                Err(ForwardError::Transport(e))
            }
        }
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}
