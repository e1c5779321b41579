use thiserror::Error;

use crate::models::CategoryIndex;

/// Errors surfaced by news sources and the source registry.
///
/// Feed-backed sources never return the fetch variants; they log and answer
/// with an empty list instead. Page-backed sources propagate them.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("invalid category index: {0}")]
    InvalidCategoryIndex(CategoryIndex),

    #[error("invalid source index: {0}")]
    InvalidSourceIndex(i64),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http error {status} from {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
}

impl SourceError {
    /// Whether the error came from talking to the upstream server.
    ///
    /// A request that hit the timeout is a [`SourceError::Transport`].
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Http { .. } | Self::Body { .. }
        )
    }
}
