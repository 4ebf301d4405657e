//! Error types for deck structuring and rendering.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// The input does not have the shape of deck content.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Failed to parse or serialize JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write output.
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error (for PPTX output).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML writing error (for PPTX output).
    #[error("XML error: {0}")]
    Xml(String),
}
