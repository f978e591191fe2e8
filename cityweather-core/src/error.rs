//! Classification of weather-provider failures into the user-facing
//! categories shown by the UI.

use reqwest::StatusCode;
use thiserror::Error;

/// A failed weather lookup, already mapped to its display message.
///
/// Classification priority: explicit HTTP status first, then transport-level
/// network failures, then the underlying message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("City not found. Please check the spelling and try again.")]
    NotFound,

    #[error("Invalid API key. Please check your configuration.")]
    Unauthorized,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Network error. Please check your connection and try again.")]
    Network,

    /// Failure with no status and no network marker; the underlying message
    /// is passed through verbatim.
    #[error("{0}")]
    Upstream(String),

    #[error("Something went wrong. Please try again.")]
    Unknown,
}

impl ProviderError {
    /// Map a non-success HTTP status to its category. Statuses without a
    /// dedicated category fall back to [`ProviderError::Unknown`].
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => ProviderError::NotFound,
            StatusCode::UNAUTHORIZED => ProviderError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
            _ => ProviderError::Unknown,
        }
    }

    /// Short category tag, used when logging classified failures.
    pub fn category(&self) -> &'static str {
        match self {
            ProviderError::NotFound => "not_found",
            ProviderError::Unauthorized => "unauthorized",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::Network => "network",
            ProviderError::Upstream(_) => "upstream",
            ProviderError::Unknown => "unknown",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ProviderError::from_status(status);
        }
        if err.is_connect() || err.is_timeout() {
            return ProviderError::Network;
        }
        ProviderError::Upstream(err.to_string())
    }
}
