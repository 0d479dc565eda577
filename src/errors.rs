/*!
 * Error types for the transcultura application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Generation failures (`ProviderError`) never escape a pipeline stage: the stage
 * renders them with [`ProviderError::inline_text`] and the run continues with that
 * text. Only `PipelineError` is returned to callers of the pipeline.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling a text generation provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error returned by the API itself (non-success HTTP status)
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The generation call did not finish within the configured bound
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The caller cancelled the in-flight generation
    #[error("Generation cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Render the failure as the text that replaces a stage output.
    ///
    /// Non-success statuses become `Error: <status>`; transport failures, timeouts,
    /// unreadable bodies and cancellation become `Connection error: <detail>`.
    pub fn inline_text(&self) -> String {
        match self {
            Self::ApiError { status_code, .. } => format!("Error: {}", status_code),
            Self::ConnectionError(detail) => format!("Connection error: {}", detail),
            Self::Timeout(limit) => format!(
                "Connection error: request timed out after {}s",
                limit.as_secs()
            ),
            Self::ParseError(detail) => format!("Connection error: {}", detail),
            Self::Cancelled => "Connection error: generation cancelled".to_string(),
        }
    }
}

/// Errors returned by the campaign pipeline entry point
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Source content is empty or missing; raised before any stage runs
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error from the history database
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database(error.to_string())
    }
}
