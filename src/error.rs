//! Error handling for ripper-http

use thiserror::Error;

/// Main error type for request building and execution
#[derive(Error, Debug)]
pub enum HttpError {
    /// Every permitted attempt failed. `source` holds the last transport
    /// fault, or nothing when zero attempts were configured.
    #[error("Failed to load {url} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Option<TransportError>,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Faults raised by a transport during a single attempt.
///
/// All variants are treated alike by the retry loop.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unhandled content type {content_type} for {url}")]
    UnsupportedContentType { content_type: String, url: String },
}

/// Result type alias for ripper-http operations
pub type Result<T> = std::result::Result<T, HttpError>;
