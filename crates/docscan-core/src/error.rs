//! Error types for the docscan-core library.

use thiserror::Error;

/// Main error type for the docscan library.
#[derive(Error, Debug)]
pub enum DocscanError {
    /// OCR service error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A document type tag that no extractor is registered for.
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while talking to the external OCR service.
///
/// Apart from [`OcrError::MissingCredentials`], these are recovered per
/// orientation attempt and never abort a request.
#[derive(Error, Debug)]
pub enum OcrError {
    /// No API key configured for the OCR service.
    #[error("missing OCR service credentials")]
    MissingCredentials,

    /// The HTTP request could not be completed.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The service answered with an error payload.
    #[error("service reported an error: {0}")]
    Service(String),

    /// The service succeeded but recognized no text.
    #[error("no text recognized")]
    NoText,

    /// The source image could not be decoded or rotated.
    #[error("invalid image: {0}")]
    Image(String),
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for OcrError {
    fn from(err: reqwest::Error) -> Self {
        OcrError::Transport(err.to_string())
    }
}

/// Result type for the docscan library.
pub type Result<T> = std::result::Result<T, DocscanError>;
