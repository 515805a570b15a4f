//! Path-prefix reverse proxy.
//!
//! Requests under a configured local prefix are rewritten onto a single
//! upstream origin and relayed back with their bodies streamed in both
//! directions. Everything else continues down the host router's chain.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod resilience;
pub mod routing;
pub mod transport;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{ForwardError, Forwarder, Outcome, ReverseProxyExt};
pub use transport::{HyperTransport, Transport, TransportError};
