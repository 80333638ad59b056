//! Error types for ocrlayout library.

use std::io;
use thiserror::Error;

/// Result type alias for ocrlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout reconstruction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The homography collaborator failed, timed out or was cancelled.
    #[error("Transform unavailable for page {page}: {reason}")]
    TransformUnavailable {
        /// Source page number
        page: u32,
        /// Provider-reported cause
        reason: String,
    },

    /// A page boundary or its homography is singular or non-finite.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A page could not be reconstructed during document assembly.
    #[error("Page {page} failed: {source}")]
    PageFailed {
        /// Source page number
        page: u32,
        /// The page-level error
        #[source]
        source: Box<Error>,
    },

    /// OCR payload does not satisfy the model's invariants.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a `TransformUnavailable` error from any displayable cause.
    pub fn transform_unavailable(page: u32, reason: impl std::fmt::Display) -> Self {
        Error::TransformUnavailable {
            page,
            reason: reason.to_string(),
        }
    }

    /// Wrap this error with the page it occurred on.
    pub fn on_page(self, page: u32) -> Self {
        match self {
            Error::PageFailed { .. } => self,
            other => Error::PageFailed {
                page,
                source: Box::new(other),
            },
        }
    }
}
