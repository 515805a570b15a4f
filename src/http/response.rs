//! Response relay.
//!
//! # Responsibilities
//! - Copy the upstream status verbatim
//! - Strip hop-by-hop headers from the upstream response
//! - Copy content headers unconditionally
//! - Stream the upstream body back to the caller
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Redirects are relayed, never followed
//! - General headers and content headers are copied in two separate passes
//! - The upstream body is released once it ends or fails, or with the relayed body

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Response, Uri};
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};

use crate::http::headers::{is_content_header, is_hop_by_hop};

/// Turn an upstream response into the response written to the caller.
pub fn relay(upstream: Response<Body>, target: &Uri) -> Response<Body> {
    let (parts, body) = upstream.into_parts();

    let mut response = Response::new(Body::new(RelayBody::new(body, target.clone())));
    *response.status_mut() = parts.status;

    let headers = response.headers_mut();
    headers.reserve(parts.headers.len());

    for (name, value) in parts.headers.iter() {
        if is_content_header(name) || is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    for (name, value) in parts.headers.iter() {
        if is_content_header(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    response
}

/// Upstream response body as seen by the caller.
///
/// Frames pass through unchanged; the wrapper only counts bytes and logs how
/// the stream ended. The upstream body is dropped as soon as it ends or
/// fails, which hands its connection back to the pool.
#[derive(Debug)]
pub struct RelayBody<B> {
    inner: Option<B>,
    target: Uri,
    bytes: u64,
}

impl<B> RelayBody<B> {
    pub fn new(inner: B, target: Uri) -> Self {
        Self {
            inner: Some(inner),
            target,
            bytes: 0,
        }
    }

    /// Bytes relayed so far.
    pub fn bytes_relayed(&self) -> u64 {
        self.bytes
    }

    /// Whether the upstream body has been released.
    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }
}

impl<B> HttpBody for RelayBody<B>
where
    B: HttpBody<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = &mut *self;
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };

        match Pin::new(inner).poll_frame(cx) {
            Poll::Ready(Some(Ok(frame))) => {
                if let Some(data) = frame.data_ref() {
                    this.bytes += data.len() as u64;
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Poll::Ready(Some(Err(e))) => {
                this.inner = None;
                tracing::warn!(
                    target_uri = %this.target,
                    bytes = this.bytes,
                    error = %e,
                    "Upstream body failed mid-stream"
                );
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.inner = None;
                tracing::debug!(
                    target_uri = %this.target,
                    bytes = this.bytes,
                    "Upstream body relayed"
                );
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.as_ref().map_or(true, |inner| inner.is_end_stream())
    }

    fn size_hint(&self) -> SizeHint {
        self.inner
            .as_ref()
            .map_or_else(|| SizeHint::with_exact(0), |inner| inner.size_hint())
    }
}
