//! Request matching logic.
//!
//! # Responsibilities
//! - Match the local path prefix on a path-segment boundary
//! - Resolve the method against the fixed method map
//! - Combine both conditions with AND semantics
//!
//! # Design Decisions
//! - Prefix comparison is ASCII case-insensitive
//! - `/api` matches `/api` and `/api/x`, never `/apix`
//! - A root prefix (`/`) matches every path
//! - Pure decision, no side effects

use axum::http::Method;

use crate::routing::methods::{self, MethodEntry};

/// Result of a successful match.
#[derive(Debug, Clone, Copy)]
pub struct Matched<'a> {
    /// Inbound path with the local prefix removed (empty or starting with `/`).
    pub remainder: &'a str,
    /// Resolved method map entry.
    pub entry: &'static MethodEntry,
}

/// Matches requests under a local path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    /// Create a new prefix matcher.
    /// The prefix gets a leading slash and loses any trailing slashes.
    pub fn new(local_path: &str) -> Self {
        Self {
            prefix: normalize_prefix(local_path),
        }
    }

    /// The normalized prefix. Empty for the root prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strip the prefix from `path`, returning the remainder.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let len = self.prefix.len();
        if path.len() < len || !path.is_char_boundary(len) {
            return None;
        }

        let (head, rest) = path.split_at(len);
        if !head.eq_ignore_ascii_case(&self.prefix) {
            return None;
        }

        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Returns the match for this method and path, or `None` if the request
    /// is not handled.
    pub fn match_request<'a>(&self, method: &Method, path: &'a str) -> Option<Matched<'a>> {
        let remainder = self.strip(path)?;
        let entry = methods::lookup(method)?;
        Some(Matched { remainder, entry })
    }
}

fn normalize_prefix(local_path: &str) -> String {
    let trimmed = local_path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
