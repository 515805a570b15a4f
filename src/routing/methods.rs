//! Fixed method map.
//!
//! Maps inbound method tokens to the outbound method and whether the method
//! may carry a request body. Methods outside this table are never proxied.

use axum::http::Method;

/// One entry of the method map.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    /// Inbound token, matched case-insensitively.
    pub token: &'static str,
    /// Method used for the outbound request.
    pub method: Method,
    /// Whether a body is forwarded for this method.
    pub has_content: bool,
}

/// Supported methods.
pub static METHOD_MAP: [MethodEntry; 8] = [
    MethodEntry { token: "DELETE", method: Method::DELETE, has_content: false },
    MethodEntry { token: "GET", method: Method::GET, has_content: false },
    MethodEntry { token: "HEAD", method: Method::HEAD, has_content: false },
    MethodEntry { token: "OPTIONS", method: Method::OPTIONS, has_content: false },
    MethodEntry { token: "PATCH", method: Method::PATCH, has_content: true },
    MethodEntry { token: "POST", method: Method::POST, has_content: true },
    MethodEntry { token: "PUT", method: Method::PUT, has_content: true },
    MethodEntry { token: "TRACE", method: Method::TRACE, has_content: false },
];

/// Look up the entry for an inbound method.
///
/// Extension methods such as a lowercase `get` resolve to their standard
/// counterpart.
pub fn lookup(method: &Method) -> Option<&'static MethodEntry> {
    METHOD_MAP
        .iter()
        .find(|entry| entry.token.eq_ignore_ascii_case(method.as_str()))
}
