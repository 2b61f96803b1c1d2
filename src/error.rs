//! Error types for Sheetbridge

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias for Sheetbridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for Sheetbridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The requested tool is not the registered export tool.
    #[error("Unknown tool")]
    UnknownTool,

    /// Tool input failed validation before any external call.
    #[error("input.rows must be a non-empty array")]
    InvalidRows,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Sheets API error: {0}")]
    Sheets(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// HTTP status class for the error taxonomy: caller-fixable input
    /// errors are 4xx, everything else (configuration, credential,
    /// external dependency) is 5xx.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::UnknownTool | BridgeError::InvalidRows => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
