//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one forwarder per configured route
//! - Wire up middleware (tracing, request ID)
//! - Answer unmatched requests with 404
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigError, ProxyConfig};
use crate::proxy::{Forwarder, ReverseProxyExt};
use crate::routing::Route;
use crate::transport::{HyperTransport, Transport};

/// HTTP server hosting the configured forwarders.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        let transport = Arc::new(HyperTransport::new(&config.timeouts, None)?);
        Self::with_transport(config, transport)
    }

    /// Create a server whose forwarders share `transport`.
    pub fn with_transport(
        config: ProxyConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        let mut forwarders = Vec::with_capacity(config.routes.len());
        for route_config in &config.routes {
            let route = Route::from_config(route_config).map_err(|source| ConfigError::Upstream {
                upstream: route_config.upstream.clone(),
                source,
            })?;

            tracing::info!(
                route = %route_config.name,
                local_path = %route_config.local_path,
                upstream = %route_config.upstream,
                "Route registered"
            );
            forwarders.push(Forwarder::with_transport(route, transport.clone()));
        }

        let router = Self::build_router(forwarders);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(forwarders: Vec<Forwarder>) -> Router {
        // Layers wrap outward, so the first configured route ends up outermost.
        let mut router = Router::new().fallback(no_route);
        for forwarder in forwarders.into_iter().rev() {
            router = router.forward_with(forwarder);
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// The assembled router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Fallback for requests no forwarder handled.
async fn no_route() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "No matching route found")
}
