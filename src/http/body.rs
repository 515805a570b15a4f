//! Streaming request body adapter.
//!
//! # Responsibilities
//! - Expose the inbound body to the outbound transport without buffering
//! - Report the declared length so the transport can pick its framing
//! - Pump the body into an arbitrary async writer
//!
//! # Design Decisions
//! - Frames move through untouched (no copy, no coalescing)
//! - Known length → length-delimited framing; unknown → chunked

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};
use http_body_util::BodyExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Outbound content source wrapping the inbound request body.
#[derive(Debug)]
pub struct ForwardBody {
    inner: Body,
    content_length: Option<u64>,
}

impl ForwardBody {
    /// Wrap an inbound body with its declared content length.
    pub fn new(inner: Body, content_length: Option<u64>) -> Self {
        Self {
            inner,
            content_length,
        }
    }

    /// A body with no content, used for methods that never carry one.
    pub fn empty() -> Self {
        Self::new(Body::empty(), Some(0))
    }

    /// Declared length in bytes, or `None` when it is unknown.
    pub fn try_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Hand back the original inbound body.
    pub fn into_inner(self) -> Body {
        self.inner
    }

    /// Copy the body to `dst` until end of stream, returning the byte count.
    pub async fn copy_to<W>(self, dst: &mut W) -> io::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut body = self.inner;
        let mut copied = 0u64;

        while let Some(frame) = body.frame().await {
            let frame = frame.map_err(io::Error::other)?;
            if let Ok(data) = frame.into_data() {
                dst.write_all(&data).await?;
                copied += data.len() as u64;
            }
        }

        dst.flush().await?;
        Ok(copied)
    }
}

impl HttpBody for ForwardBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.inner).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        match self.content_length {
            Some(length) => SizeHint::with_exact(length),
            None => self.inner.size_hint(),
        }
    }
}
