//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use rcgen::CertifiedKey;
use rustls::pki_types::CertificateDer;
use rustls::RootCertStore;
use tokio::net::TcpListener;

use prefix_proxy::config::{ProxyConfig, RouteConfig};
use prefix_proxy::transport::{tls_config_with_roots, TransportHook, TransportSettings};
use prefix_proxy::{HttpServer, Shutdown};

/// Serve `router` on an ephemeral port.
pub async fn start_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    addr
}

/// Serve `router` over https with a fresh self-signed certificate.
pub async fn start_tls_upstream(router: Router) -> (SocketAddr, CertificateDer<'static>) {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string(), "127.0.0.1".to_string()])
            .unwrap();
    let config = RustlsConfig::from_pem(cert.pem().into_bytes(), key_pair.serialize_pem().into_bytes())
        .await
        .unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum_server::from_tcp_rustls(listener, config)
            .serve(router.into_make_service())
            .await;
    });

    (addr, cert.der().clone())
}

/// Transport hook that trusts only `cert`.
pub fn trusting(cert: CertificateDer<'static>) -> TransportHook {
    Box::new(move |settings: &mut TransportSettings| {
        let mut roots = RootCertStore::empty();
        roots.add(cert).unwrap();
        settings.tls = tls_config_with_roots(roots).unwrap();
    })
}

/// A port with nothing listening on it.
pub fn dead_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Proxy config forwarding each `(local_path, upstream)` pair.
pub fn proxy_config(routes: &[(&str, String)]) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    for (local_path, upstream) in routes {
        config.routes.push(RouteConfig {
            name: local_path.trim_start_matches('/').to_string(),
            local_path: local_path.to_string(),
            upstream: upstream.clone(),
        });
    }
    config.timeouts.request_secs = 5;
    config
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy(mut config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never follows redirects and ignores system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Upstream used by most tests. Everything lives under `/v1`.
pub fn echo_upstream(hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/v1/headers", any(echo_headers))
        .route("/v1/count", post(count_body).put(count_body))
        .route("/v1/redirect", get(redirect))
        .route("/v1/hop", get(hop_headers))
        .route("/v1/slow", get(slow))
        .route("/v1/broken", get(broken_body))
        .fallback(echo_uri)
        .layer(axum::middleware::from_fn(
            move |request: axum::extract::Request, next: axum::middleware::Next| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    next.run(request).await
                }
            },
        ))
}

async fn echo_uri(method: Method, uri: Uri) -> String {
    // HTTP/2 requests carry an absolute URI; report only the path.
    let path = uri.path_and_query().map_or("/", |pq| pq.as_str());
    format!("{} {}", method, path)
}

async fn echo_headers(headers: HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("?")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Counts body bytes as they stream in, never holding more than one chunk.
async fn count_body(headers: HeaderMap, body: Body) -> String {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();

    let mut stream = body.into_data_stream();
    let mut total = 0usize;
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => total += chunk.len(),
            Err(_) => return format!("error after {}", total),
        }
    }

    format!("{} {}", total, declared)
}

async fn redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/v1/landing")]).into_response()
}

async fn hop_headers() -> Response {
    Response::builder()
        .header("Keep-Alive", "timeout=5")
        .header("Trailer", "x-checksum")
        .header("X-Upstream", "yes")
        .header("Set-Cookie", "a=1")
        .header("Set-Cookie", "b=2")
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CONTENT_LANGUAGE, "en")
        .body(Body::from("hop"))
        .unwrap()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "finally"
}

/// Sends one chunk, then fails after the headers are on the wire.
async fn broken_body() -> Response {
    let chunks = stream::unfold(0u8, |step| async move {
        match step {
            0 => Some((Ok::<_, io::Error>(Bytes::from_static(b"partial")), 1)),
            1 => {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Some((Err(io::Error::new(io::ErrorKind::ConnectionReset, "upstream gave up")), 2))
            }
            _ => None,
        }
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from_stream(chunks))
        .unwrap()
}
