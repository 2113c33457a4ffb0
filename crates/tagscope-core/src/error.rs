//! Error taxonomy for calls against the upstream service.
//!
//! A call either produces a typed result (including the "hashtag does not
//! exist" case, which is a normal response) or fails with exactly one of:
//!
//! - [`Error::Transport`] — network failure or a non-2xx status.
//! - [`Error::Parse`] — the response body was not valid for the requested shape.
//!
//! Neither kind is retried. Out-of-range inputs (zoom outside `2..=16`,
//! odd hashtags) are passed through to upstream and never rejected locally.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {message}")]
    Transport {
        url: String,
        /// HTTP status for non-2xx responses; `None` for network failures.
        status: Option<u16>,
        message: String,
    },

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Network-level failure (timeout, refused connection, DNS...).
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transport {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Upstream answered with a non-2xx status.
    pub fn status(url: impl Into<String>, status: u16, body: &str) -> Self {
        let snippet: String = body.chars().take(200).collect();
        Error::Transport {
            url: url.into(),
            status: Some(status),
            message: format!("HTTP {}: {}", status, snippet),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// HTTP status carried by a transport error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => *status,
            Error::Parse(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
