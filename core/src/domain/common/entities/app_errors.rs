use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Required credential material is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Signing, decryption or token exchange failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The operation needs the caller's own credential and none was supplied.
    #[error("User authentication required")]
    AuthenticationRequired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("No preview available for this file")]
    PreviewUnavailable,

    #[error("No download location returned for this file")]
    DownloadUnavailable,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}
