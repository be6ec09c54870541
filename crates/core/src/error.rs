//! Error types for the mood-melody-core library.
//!
//! This module provides granular error variants for different failure modes,
//! enabling precise error handling and user-friendly error messages.

use thiserror::Error;

/// Errors that can occur within the mood-melody-core library.
///
/// Each variant represents a specific failure mode with contextual information
/// to help diagnose and handle errors appropriately.
///
/// Everything raised by the analysis client crosses the boundary as a single
/// [`AppError::Service`] carrying a displayable message; the UI never needs to
/// distinguish a transport failure from a malformed response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing keys, invalid values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A photo could not be loaded, decoded, or encoded for upload.
    #[error("Photo processing failed: {0}")]
    Photo(String),

    /// The requested emotion label is not in the emotion table.
    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    /// The Gemini analysis call failed: network error, service-reported
    /// error, or an unparseable response.
    #[error("Gemini service error: {0}")]
    Service(String),

    /// UI-related errors (rendering, window management).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a photo processing error with the given message.
    pub fn photo(msg: impl Into<String>) -> Self {
        Self::Photo(msg.into())
    }

    /// Creates an analysis service error with the given message.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
