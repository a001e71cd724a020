//! Error types for slide-deck extraction and summarization.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or summarizing a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to parse the PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// The requested summarization model is not in the supported set.
    #[error("Unknown summarization model: {0}")]
    UnknownModel(String),

    /// The inference service does not serve the requested model.
    #[error("Model {model} is unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },

    /// The inference call failed or returned an unusable response.
    #[error("Inference error: {0}")]
    InferenceError(String),
}
