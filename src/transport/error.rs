//! Transport error classification.

use std::time::Duration;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while sending a request upstream.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established (refused, DNS, unreachable).
    #[error("failed to connect to upstream: {0}")]
    Connect(#[source] BoxError),

    /// Upstream did not answer before the deadline.
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    /// Any other failure after the connection was established.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] BoxError),
}

impl TransportError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Connect(_) => "connect",
            TransportError::Timeout(_) => "timeout",
            TransportError::Upstream(_) => "upstream",
        }
    }
}

impl From<hyper_util::client::legacy::Error> for TransportError {
    fn from(e: hyper_util::client::legacy::Error) -> Self {
        if e.is_connect() {
            TransportError::Connect(Box::new(e))
        } else {
            TransportError::Upstream(Box::new(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(TransportError::Connect("x".into()).kind(), "connect");
        assert_eq!(TransportError::Timeout(Duration::from_secs(1)).kind(), "timeout");
        assert_eq!(TransportError::Upstream("x".into()).kind(), "upstream");
    }

    #[test]
    fn test_display() {
        let err = TransportError::Connect("connection refused".into());
        assert_eq!(err.to_string(), "failed to connect to upstream: connection refused");
    }
}
