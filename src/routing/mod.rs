//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → matcher.rs (local prefix on a segment boundary)
//!     → methods.rs (fixed method map, case-insensitive)
//!     → Return: Matched { remainder, entry } or NoMatch
//!
//! Route Compilation (at startup):
//!     RouteConfig
//!     → normalize local prefix
//!     → parse upstream origin + base path
//!     → Freeze as immutable Route
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Method map and prefix rules are data, not branches
//! - NoMatch is not an error: the request goes to the next handler

pub mod matcher;
pub mod methods;
pub mod router;
pub mod upstream;

pub use matcher::{Matched, PrefixMatcher};
pub use methods::{MethodEntry, METHOD_MAP};
pub use router::Route;
pub use upstream::{UpstreamError, UpstreamTarget};
