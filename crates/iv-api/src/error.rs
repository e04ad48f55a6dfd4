//! API client error types.

use iv_core::routes::Redirect;
use thiserror::Error;

/// Errors that can occur when talking to the interview backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Server-provided message, or the raw body.
        message: String,
    },

    /// Credentials were rejected. They have already been cleared.
    #[error("unauthorized; sign in again at {redirect}")]
    Unauthorized {
        /// Where the user must go to recover.
        redirect: Redirect,
    },

    /// The backend returned a 429 Too Many Requests response.
    #[error("rate limited; retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A request failed a client-side presence check.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl ApiError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited { .. } => true,
            Self::Unauthorized { .. } | Self::Parse(_) | Self::Validation(_) => false,
        }
    }

    /// Status code carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) | Self::Validation(_) => None,
        }
    }
}

impl From<iv_core::errors::CoreError> for ApiError {
    fn from(error: iv_core::errors::CoreError) -> Self {
        Self::Validation(error.to_string())
    }
}
