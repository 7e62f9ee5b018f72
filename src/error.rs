// src/error.rs
//! Error taxonomy shared by the search pipeline.

use thiserror::Error;

use crate::query::SiteQuery;
use crate::types::Site;

/// Invalid or missing search input. Fatal to the current invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("job position is required")]
    MissingJobPosition,

    #[error("unknown job site '{0}', expected 1 (work.ua) or 2 (robota.ua)")]
    UnknownSite(String),

    #[error("invalid {field}: '{value}' is not a non-negative whole number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("result limit must be a positive number")]
    InvalidLimit,
}

/// Failure while retrieving a page or a single listing.
///
/// Recovered at the assembler boundary; never propagated as a crash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("a {query_site} query cannot be sent to {url}")]
    QueryMismatch { url: String, query_site: Site },
}

impl FetchError {
    /// A source was handed another site's query.
    pub(crate) fn mismatched_query(url: &str, expected: Site, query: &SiteQuery) -> Self {
        tracing::error!("Expected a {} query for {}", expected, url);
        FetchError::QueryMismatch {
            url: url.to_string(),
            query_site: query.site(),
        }
    }

    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_decode() {
            FetchError::Parse {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}
