//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → [proxy::Forwarder decides: forward or pass on]
//!     → request.rs (translate: URI, headers, body adapter)
//!     → body.rs (stream the inbound body upstream)
//!     → [transport sends, upstream answers]
//!     → response.rs (relay: status, headers, body)
//!     → Send to client
//! ```

pub mod body;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use body::ForwardBody;
pub use request::{request_id, OutboundRequest, X_REQUEST_ID};
pub use response::{relay, RelayBody};
pub use server::HttpServer;
