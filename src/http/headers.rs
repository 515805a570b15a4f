//! Header classification.
//!
//! # Responsibilities
//! - Identify hop-by-hop headers (never forwarded in either direction)
//! - Identify content headers (`Content-*`, describing the body)
//!
//! # Design Decisions
//! - The hop-by-hop set is a constant table, never configurable
//! - All comparisons are ASCII case-insensitive

use axum::http::HeaderName;

/// Headers that only make sense on a single connection leg.
pub const HOP_BY_HOP_HEADERS: &[&str] = &[
    "host",
    "keep-alive",
    "transfer-encoding",
    "te",
    "connection",
    "trailer",
    "upgrade",
];

/// Prefix shared by all content headers.
pub const CONTENT_HEADER_PREFIX: &str = "content-";

/// Returns true if the header must not be forwarded.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|hop| hop.eq_ignore_ascii_case(name.as_str()))
}

/// Returns true if the header describes the message body.
pub fn is_content_header(name: &HeaderName) -> bool {
    name.as_str()
        .get(..CONTENT_HEADER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CONTENT_HEADER_PREFIX))
}
