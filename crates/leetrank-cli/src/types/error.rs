//! Errors raised while talking to the ranking endpoints.
//!
//! None of these escape [`Fetcher::fetch_rank`](crate::fetch::Fetcher::fetch_rank);
//! they are logged there and turned into an absent ranking.

/// All errors that can occur while fetching a ranking.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be built (e.g. TLS backend unavailable).
    #[error("HTTP client unavailable: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Whether the failure was a timeout on the wire.
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Request { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Convenience result type.
pub type FetchResult<T> = Result<T, FetchError>;
