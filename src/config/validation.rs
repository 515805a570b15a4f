//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate upstream URIs and local prefixes
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::routing::{PrefixMatcher, UpstreamError, UpstreamTarget};

/// A single semantic problem in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("route `{route}`: local_path must not be empty")]
    EmptyLocalPath { route: String },

    #[error("route `{route}`: {source}")]
    Upstream {
        route: String,
        #[source]
        source: UpstreamError,
    },

    #[error("local_path `{0}` is declared more than once")]
    DuplicateLocalPath(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        let label = if route.name.is_empty() {
            format!("#{}", index)
        } else {
            route.name.clone()
        };

        if route.local_path.trim().is_empty() {
            errors.push(ValidationError::EmptyLocalPath { route: label.clone() });
        } else {
            let prefix = PrefixMatcher::new(&route.local_path).prefix().to_ascii_lowercase();
            if !seen.insert(prefix.clone()) {
                errors.push(ValidationError::DuplicateLocalPath(route.local_path.clone()));
            }
        }

        if let Err(source) = UpstreamTarget::parse(&route.upstream) {
            errors.push(ValidationError::Upstream { route: label, source });
        }
    }

    let timeouts = [
        ("connect_secs", config.timeouts.connect_secs),
        ("request_secs", config.timeouts.request_secs),
        ("idle_secs", config.timeouts.idle_secs),
    ];
    for (name, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
