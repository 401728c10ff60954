//! Failure taxonomy of a completion request.

use thiserror::Error;

/// What went wrong while asking the provider for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// The provider answered with an error not covered by another kind.
    Api,
    /// Bad or missing credentials.
    Authentication,
    /// The provider could not be reached.
    Connection,
    /// The request was rejected as malformed.
    InvalidRequest,
    RateLimit,
    ServiceUnavailable,
    Timeout,
    /// Anything unclassified, including unreadable responses.
    Other,
}

impl ProviderErrorKind {
    /// Human-readable prefix put in front of the provider's own message.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Api => "OpenAI API returned an API Error",
            Self::Authentication => "OpenAI API returned an Authentication Error",
            Self::Connection => "Failed to connect to OpenAI API",
            Self::InvalidRequest => "Invalid Request Error",
            Self::RateLimit => "OpenAI API request exceeded rate limit",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::Timeout => "Request timed out",
            Self::Other => "An exception has occured",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}: {message}", .kind.prefix())]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }
}

impl From<anyhow::Error> for ProviderError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}
