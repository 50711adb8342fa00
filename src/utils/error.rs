//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Parsing has no error type: malformed frames are skipped and identity
//! fields degrade to best-effort values instead of failing.

use thiserror::Error;

/// Errors that can occur while writing a call chain to the graph sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Transaction rejected by database ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("Invalid database response: {0}")]
    InvalidResponse(String),

    #[error("Graph sink unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned from the reporting entry points
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("no global stack reporter is installed; call install_global first")]
    Unconfigured,

    #[error("a global stack reporter is already installed")]
    AlreadyConfigured,

    #[error("failed to write stack to graph: {0}")]
    Sink(#[from] SinkError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
