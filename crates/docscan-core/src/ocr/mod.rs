//! External OCR service access and the orientation retry loop.

mod orientation;
mod processor;

#[cfg(feature = "native")]
mod ocr_space;

pub use orientation::{OrientationAttempt, OrientationRetry, RetryOutcome, RetryState};
pub use processor::DocumentProcessor;

#[cfg(feature = "native")]
pub use ocr_space::OcrSpaceClient;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Clockwise rotation applied to the source image before recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// As scanned.
    #[serde(rename = "0")]
    Upright,
    /// Rotated 90° clockwise.
    #[serde(rename = "90")]
    Right,
    /// Upside down.
    #[serde(rename = "180")]
    Flipped,
    /// Rotated 270° clockwise.
    #[serde(rename = "270")]
    Left,
}

impl Orientation {
    /// Rotation in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            Orientation::Upright => 0,
            Orientation::Right => 90,
            Orientation::Flipped => 180,
            Orientation::Left => 270,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Text returned by the OCR service for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    /// Unstructured recognized text.
    pub text: String,

    /// Engine-reported confidence, when the service provides one.
    pub engine_confidence: Option<f32>,
}

impl RecognizedText {
    /// Recognized text without an engine confidence.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            engine_confidence: None,
        }
    }

    /// Whether the service recognized nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An OCR backend that turns a document image URL into text.
#[async_trait]
pub trait OcrService: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Recognize the image at `file_url`, rotated by `orientation`.
    async fn recognize(&self, file_url: &str, orientation: Orientation) -> Result<RecognizedText, OcrError>;
}
