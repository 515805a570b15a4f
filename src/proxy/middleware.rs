//! Axum integration.
//! Registers a forwarder as middleware in a router's chain.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::config::ConfigError;
use crate::proxy::{Forwarder, Outcome};
use crate::transport::TransportHook;

/// Forward matching requests; hand everything else to `next`.
pub async fn forward_middleware(
    State(forwarder): State<Forwarder>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match forwarder.forward(request).await {
        Ok(Outcome::Relayed(response)) => response,
        Ok(Outcome::NotHandled(request)) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Adds reverse-proxy forwarders to an axum [`Router`].
///
/// Like any router layer, a forwarder only wraps routes and fallbacks that
/// were added before it, and the last forwarder added sees requests first.
pub trait ReverseProxyExt: Sized {
    /// Forward requests under `local_path` to `upstream`.
    fn reverse_proxy(
        self,
        local_path: &str,
        upstream: &str,
        hook: Option<TransportHook>,
    ) -> Result<Self, ConfigError>;

    /// Install an already-built forwarder.
    fn forward_with(self, forwarder: Forwarder) -> Self;
}

impl<S> ReverseProxyExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn reverse_proxy(
        self,
        local_path: &str,
        upstream: &str,
        hook: Option<TransportHook>,
    ) -> Result<Self, ConfigError> {
        let forwarder = Forwarder::new(local_path, upstream, hook)?;
        Ok(self.forward_with(forwarder))
    }

    fn forward_with(self, forwarder: Forwarder) -> Self {
        self.layer(middleware::from_fn_with_state(forwarder, forward_middleware))
    }
}
