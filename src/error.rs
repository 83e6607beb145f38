//! Error types for Carbon Arc API operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during Carbon Arc API operations.
#[derive(Debug, Error)]
pub enum CarbonArcError {
    /// Configuration is missing or incomplete.
    #[error("Carbon Arc configuration required: {0}")]
    ConfigMissing(String),

    /// The token was rejected (HTTP 401 or 403).
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The server rejected the request parameters (HTTP 400 or 422).
    #[error("Validation failed (HTTP {status}): {message}")]
    Validation { status: u16, message: String },

    /// Rate limited (HTTP 429).
    #[error("Rate limited, retry after {retry_after_secs:?} seconds: {message}")]
    RateLimited {
        retry_after_secs: Option<u64>,
        message: String,
    },

    /// Any other non-success response. `body` is the raw response text.
    #[error("Carbon Arc API error (HTTP {status_code}): {message}")]
    Api {
        status_code: u16,
        message: String,
        body: String,
    },

    /// The operation has no route in the active API version.
    #[error("{operation} is not available in API version {version}")]
    Unsupported {
        operation: &'static str,
        version: String,
    },

    /// Download destination directory does not exist.
    #[error("Output directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Date filter not in `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS` form.
    #[error("Invalid date '{0}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
    InvalidDate(String),

    /// A request needs at least one filter that was not supplied.
    #[error("Missing required filter: {0}")]
    MissingFilter(String),

    /// No filename given and the server sent no `Content-Disposition`.
    #[error("Filename required: no filename given and the response has no Content-Disposition header")]
    FilenameRequired,

    /// Request payload failed local validation.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Response body did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Filesystem error while writing a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CarbonArcError {
    /// HTTP status code carried by this error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Validation { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Api { status_code, .. } => Some(*status_code),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true for 401/403 failures.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Raw response body of a generic API error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Classify a non-success status, its extracted message and raw body.
    pub(crate) fn from_status(
        status: u16,
        message: String,
        body: String,
        retry_after_secs: Option<u64>,
    ) -> Self {
        match status {
            401 | 403 => Self::Authentication { status, message },
            404 => Self::NotFound { message },
            400 | 422 => Self::Validation { status, message },
            429 => Self::RateLimited {
                retry_after_secs,
                message,
            },
            _ => Self::Api {
                status_code: status,
                message,
                body,
            },
        }
    }
}

/// Result type alias for Carbon Arc operations.
pub type Result<T> = core::result::Result<T, CarbonArcError>;
