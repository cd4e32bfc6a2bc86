use thiserror::Error;

/// Errors that can occur when interacting with a Git hosting platform.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required parameter was missing or malformed. Raised before any
    /// request is sent.
    #[error("Invalid parameter `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The client was built without an access token.
    #[error("An access token is required")]
    MissingToken,

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The transport failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned a non-2xx response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    /// Create a validation error for `field`.
    #[inline]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Whether this is an input error (never worth retrying).
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::MissingToken)
    }

    /// HTTP status code, if the platform answered with an error response.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message. API error bodies can be long
/// HTML pages, so only the first line is kept for terminal output.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
