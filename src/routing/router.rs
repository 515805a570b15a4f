//! Compiled route: one local prefix bound to one upstream.
//!
//! # Responsibilities
//! - Hold the normalized prefix matcher and upstream target
//! - Build from a `RouteConfig` or from raw strings
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Explicit NoMatch rather than silent default

use crate::config::RouteConfig;
use crate::routing::matcher::PrefixMatcher;
use crate::routing::upstream::{UpstreamError, UpstreamTarget};

/// A local path prefix forwarded to a single upstream origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub matcher: PrefixMatcher,
    pub upstream: UpstreamTarget,
}

impl Route {
    /// Create a route from a local prefix and an upstream URI.
    pub fn new(local_path: &str, upstream: &str) -> Result<Self, UpstreamError> {
        Ok(Self {
            matcher: PrefixMatcher::new(local_path),
            upstream: UpstreamTarget::parse(upstream)?,
        })
    }

    /// Compile a route from configuration.
    pub fn from_config(config: &RouteConfig) -> Result<Self, UpstreamError> {
        Self::new(&config.local_path, &config.upstream)
    }
}
