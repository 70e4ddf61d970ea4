use thiserror::Error;

/// Errors raised by providers and the chain.
///
/// Only [`ParseError::NoResult`] is recoverable: the chain converts it into
/// "try the next provider". Every other variant surfaces to the caller
/// unchanged, so a credentials or quota problem is never silently skipped.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The backend ran but produced nothing usable for this user agent.
    #[error("no result found for user agent: {0}")]
    NoResult(String),

    /// Transport-level failure talking to a remote backend.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered, but not with something we can use
    /// (unexpected status, wrong content type, malformed payload).
    #[error("invalid response from \"{url}\": {reason}")]
    InvalidResponse { url: String, reason: String },

    /// The backend rejected the configured credentials.
    #[error("invalid credentials for provider {provider}")]
    InvalidCredentials { provider: &'static str },

    /// The backend reported quota exhaustion for the configured credentials.
    #[error("request limit exceeded for provider {provider}")]
    LimitExceeded { provider: &'static str },
}

impl ParseError {
    /// Whether this error means "backend had no answer" rather than
    /// "something went wrong".
    pub fn is_no_result(&self) -> bool {
        matches!(self, ParseError::NoResult(_))
    }
}
