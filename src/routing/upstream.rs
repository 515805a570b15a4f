//! Upstream origin and target URI rewriting.

use axum::http::uri::{Authority, InvalidUri, Scheme};
use axum::http::{self, Uri};
use thiserror::Error;

/// Errors raised while parsing an upstream URI.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream URI: {0}")]
    Parse(#[from] InvalidUri),

    #[error("upstream URI must be absolute (scheme and host)")]
    NotAbsolute,

    #[error("unsupported upstream scheme `{0}`")]
    UnsupportedScheme(String),

    #[error("upstream URI must not carry a query string")]
    HasQuery,
}

/// The single origin a route forwards to.
///
/// The path component of the configured URI becomes the base path that is
/// prepended to every forwarded request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
}

impl UpstreamTarget {
    /// Parse an absolute `http` or `https` URI.
    pub fn parse(upstream: &str) -> Result<Self, UpstreamError> {
        let uri: Uri = upstream.trim().parse()?;

        let scheme = uri.scheme().cloned().ok_or(UpstreamError::NotAbsolute)?;
        if scheme != Scheme::HTTP && scheme != Scheme::HTTPS {
            return Err(UpstreamError::UnsupportedScheme(scheme.to_string()));
        }

        let authority = uri.authority().cloned().ok_or(UpstreamError::NotAbsolute)?;

        if uri.query().is_some() {
            return Err(UpstreamError::HasQuery);
        }

        Ok(Self {
            scheme,
            authority,
            base_path: uri.path().trim_end_matches('/').to_string(),
        })
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Base path without a trailing slash. Empty when the URI has no path.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Build the absolute outbound URI: base path + remainder + query.
    pub fn target_uri(&self, remainder: &str, query: Option<&str>) -> Result<Uri, http::Error> {
        let query_len = query.map_or(0, |q| q.len() + 1);
        let mut path_and_query =
            String::with_capacity(self.base_path.len() + remainder.len() + query_len + 1);

        path_and_query.push_str(&self.base_path);
        path_and_query.push_str(remainder);
        if path_and_query.is_empty() {
            path_and_query.push('/');
        }
        if let Some(query) = query {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
    }
}
