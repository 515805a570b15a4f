//! Pooled hyper client transport.
//!
//! # Responsibilities
//! - Own the shared connection pool (HTTP/1.1 and HTTP/2, http and https)
//! - Apply connect, request and idle timeouts
//! - Let the host tweak the client and its TLS setup once, before it is built
//!
//! # Design Decisions
//! - hyper never follows redirects, so 3xx responses reach the caller as-is
//! - TLS is rustls over the `ring` provider, trusting the OS root store
//! - An empty root store is not an error; only https upstreams are affected

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::{TokioExecutor, TokioTimer};
use rustls::{ClientConfig, RootCertStore};

use crate::config::{ConfigError, TimeoutConfig};
use crate::http::body::ForwardBody;
use crate::resilience::timeouts::with_deadline;
use crate::transport::{Transport, TransportError, TransportFuture};

/// Builder for the pooled client, exposed to the customization hook.
pub type ClientBuilder = hyper_util::client::legacy::Builder;

/// Everything a [`TransportHook`] may adjust before the client is built.
pub struct TransportSettings {
    pub builder: ClientBuilder,
    /// TCP connector underneath TLS. Must not enforce the `http` scheme.
    pub connector: HttpConnector,
    /// TLS for https upstreams. Replace it to change roots or verification.
    pub tls: ClientConfig,
}

/// Customization hook, invoked once at construction.
pub type TransportHook = Box<dyn FnOnce(&mut TransportSettings) + Send>;

/// Transport backed by `hyper_util`'s pooled client.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpsConnector<HttpConnector>, ForwardBody>,
    request_timeout: Duration,
}

impl HyperTransport {
    /// Build the client from timeout settings and an optional hook.
    pub fn new(timeouts: &TimeoutConfig, hook: Option<TransportHook>) -> Result<Self, ConfigError> {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));
        connector.set_nodelay(true);
        connector.enforce_http(false);

        let mut builder = Client::builder(TokioExecutor::new());
        builder
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(Duration::from_secs(timeouts.idle_secs));

        let mut settings = TransportSettings {
            builder,
            connector,
            tls: default_tls_config()?,
        };

        if let Some(hook) = hook {
            hook(&mut settings);
        }

        let TransportSettings {
            builder,
            connector,
            tls,
        } = settings;

        let https = HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .wrap_connector(connector);

        Ok(Self {
            client: builder.build(https),
            request_timeout: Duration::from_secs(timeouts.request_secs),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// TLS client config trusting the platform's root certificates.
pub fn default_tls_config() -> Result<ClientConfig, ConfigError> {
    let mut roots = RootCertStore::empty();

    let native = rustls_native_certs::load_native_certs();
    for error in &native.errors {
        tracing::warn!(error = %error, "Failed to load a native root certificate");
    }
    let (added, ignored) = roots.add_parsable_certificates(native.certs);
    tracing::debug!(added, ignored, "Loaded native root certificates");

    Ok(tls_config_with_roots(roots)?)
}

/// TLS client config trusting exactly `roots`.
pub fn tls_config_with_roots(roots: RootCertStore) -> Result<ClientConfig, rustls::Error> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    Ok(ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth())
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: Request<ForwardBody>) -> TransportFuture {
        let client = self.client.clone();
        let limit = self.request_timeout;

        Box::pin(async move {
            let response = with_deadline(limit, async move {
                client.request(request).await.map_err(TransportError::from)
            })
            .await?;

            Ok(response.map(Body::new))
        })
    }
}
