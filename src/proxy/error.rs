//! Forwarding errors.

use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::transport::TransportError;

/// Errors that abort forwarding of a matched request.
///
/// None of these are retried; the host decides what the caller sees. The
/// axum integration maps them to 502 Bad Gateway, or 504 Gateway Timeout
/// when the upstream timed out.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The transport failed to deliver the request or produce a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The outbound request could not be assembled.
    #[error("invalid outbound request: {0}")]
    InvalidRequest(#[from] axum::http::Error),

    /// A header cannot be forwarded as-is.
    #[error("malformed header `{name}`: {reason}")]
    MalformedHeader { name: HeaderName, reason: String },
}

impl ForwardError {
    /// Status code reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::Transport(TransportError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let message = match self.status() {
            StatusCode::GATEWAY_TIMEOUT => "Upstream request timed out",
            _ => "Upstream request failed",
        };
        (self.status(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        let timeout = ForwardError::from(TransportError::Timeout(Duration::from_secs(1)));
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        let refused = ForwardError::from(TransportError::Connect("refused".into()));
        assert_eq!(refused.status(), StatusCode::BAD_GATEWAY);

        let header = ForwardError::MalformedHeader {
            name: HeaderName::from_static("content-length"),
            reason: "no body".into(),
        };
        assert_eq!(header.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_into_response() {
        let response = ForwardError::from(TransportError::Upstream("reset".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
