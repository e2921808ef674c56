use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The upstream provider answered with a rate-limit (HTTP 429) response.
    ///
    /// This is the only retryable kind. It is consumed by the retry loop and only
    /// reaches callers wrapped as [`HistoryError::RateLimitExceeded`].
    #[error("rate limited by upstream provider")]
    RateLimited {
        /// The raw `Retry-After` hint, either delta-seconds or an HTTP date.
        retry_after: Option<String>,
    },

    /// Every retry was spent on rate-limit responses.
    #[error("rate limit still in effect for {ticker} after {retries} retries")]
    RateLimitExceeded {
        /// The ticker whose fetch gave up.
        ticker: String,
        /// Number of retries performed after the initial request.
        retries: u32,
    },

    /// The data received from the provider was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The caller's cancellation token fired before the fetch completed.
    #[error("fetch cancelled")]
    Cancelled,
}

impl HistoryError {
    /// `true` for a single rate-limit response (the retryable kind).
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// `true` once the retry budget was exhausted on rate limits.
    ///
    /// Rendering code uses this to show "try again shortly" instead of a hard failure.
    #[must_use]
    pub const fn is_rate_limit_exhausted(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
