//! Error types for trailpost-core

use thiserror::Error;

/// Result type alias using trailpost-core's `ApiError`
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Input rejected on the client before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username/email and password must not be empty")]
    MissingCredentials,
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("Password and confirmation do not match")]
    PasswordMismatch,
    #[error("Please enter a title")]
    EmptyTitle,
    #[error("Please enter some content")]
    EmptyContent,
    #[error("Comment must not be empty")]
    EmptyComment,
    #[error("Search keyword must not be empty")]
    EmptyKeyword,
    #[error("{0} identifier must not be empty")]
    EmptyIdentifier(&'static str),
}

/// Errors that can occur talking to the forum backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Form input failed validation; nothing was sent
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// An authenticated operation was attempted without a stored session
    #[error("Please log in first")]
    AuthRequired,

    /// The server rejected the credentials or the stored token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The server refused the operation for this user
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Any other non-success status, from HTTP or the response envelope
    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Session storage error: {0}")]
    SessionStorage(String),

    /// The view that issued the request was closed before it settled
    #[error("Request was cancelled")]
    Cancelled,
}

impl ApiError {
    /// Builds the error for a failed status code and the server's message.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            _ => Self::Status { status, message },
        }
    }

    /// True when the user must sign in (again) before retrying.
    pub const fn needs_login(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::Unauthorized(_))
    }
}
