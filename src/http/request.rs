//! Request translation.
//!
//! # Responsibilities
//! - Build the outbound request from a matched inbound request
//! - Drop hop-by-hop headers
//! - Route `Content-*` headers next to the body for content-bearing methods
//! - Attach the streaming body adapter when the method carries content
//!
//! # Design Decisions
//! - Headers are copied once per occurrence, in order, never repaired
//! - The inbound body is moved, never buffered
//! - Request ID is read from the header set by the host middleware

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Method, Request, Uri};

use crate::http::body::ForwardBody;
use crate::http::headers::{is_content_header, is_hop_by_hop};
use crate::proxy::ForwardError;
use crate::routing::MethodEntry;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Returns the request ID, or `"unknown"` when none was assigned.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// A request ready to be handed to the outbound transport.
#[derive(Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub uri: Uri,
    /// Headers describing the exchange.
    pub headers: HeaderMap,
    /// Headers describing the body. Only populated when `body` is set.
    pub content_headers: HeaderMap,
    pub body: Option<ForwardBody>,
}

impl OutboundRequest {
    /// Translate an inbound request already resolved to `target`.
    pub fn from_inbound(request: Request<Body>, target: Uri, entry: &MethodEntry) -> Self {
        let (parts, body) = request.into_parts();

        let mut headers = HeaderMap::with_capacity(parts.headers.len());
        let mut content_headers = HeaderMap::new();

        for (name, value) in parts.headers.iter() {
            if is_hop_by_hop(name) {
                continue;
            }

            if entry.has_content && is_content_header(name) {
                content_headers.append(name.clone(), value.clone());
            } else {
                headers.append(name.clone(), value.clone());
            }
        }

        let body = entry.has_content.then(|| {
            let declared = declared_length(&parts.headers);
            ForwardBody::new(body, declared)
        });

        Self {
            method: entry.method.clone(),
            uri: target,
            headers,
            content_headers,
            body,
        }
    }

    /// Assemble the `http::Request` handed to the transport.
    ///
    /// A body-less request that still declares a non-zero `Content-Length`
    /// is rejected, since the transport would wait for bytes that never come.
    pub fn into_http(self) -> Result<Request<ForwardBody>, ForwardError> {
        if self.body.is_none() {
            if let Some(length) = declared_length(&self.headers).filter(|len| *len > 0) {
                return Err(ForwardError::MalformedHeader {
                    name: header::CONTENT_LENGTH,
                    reason: format!("{} declares {} bytes but carries no body", self.method, length),
                });
            }
        }

        let mut builder = Request::builder().method(self.method).uri(self.uri);

        if let Some(headers) = builder.headers_mut() {
            for (name, value) in self.headers.iter() {
                headers.append(name.clone(), value.clone());
            }
            for (name, value) in self.content_headers.iter() {
                headers.append(name.clone(), value.clone());
            }
        }

        let body = self.body.unwrap_or_else(ForwardBody::empty);
        Ok(builder.body(body)?)
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
