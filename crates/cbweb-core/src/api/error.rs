//! Content API error type.

/// Failure of one content API call. Page mappers never surface these to the
/// visitor; they log them and substitute fallback content.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// libcurl reported an error (connection refused, DNS, timeout, ...).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// The API answered with a non-2xx status.
    #[error("{method} {path} returned HTTP {status}")]
    Http {
        method: &'static str,
        path: String,
        status: u32,
    },
    /// The body was not valid JSON.
    #[error("decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The blocking worker running the request panicked or was cancelled.
    #[error("request worker failed: {0}")]
    Worker(String),
}

impl FetchError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_operation_timedout())
    }
}
