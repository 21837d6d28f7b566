//! Configuration for the OCR service and the orientation retry policy.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DocscanError, OcrError, Result};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OCR_SPACE_API_KEY";

/// Main configuration for the docscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocscanConfig {
    /// OCR service configuration.
    pub ocr: OcrConfig,

    /// Orientation retry thresholds.
    pub orientation: OrientationConfig,
}

/// External OCR service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Parse endpoint of the OCR service.
    pub endpoint: String,

    /// API key. Falls back to `OCR_SPACE_API_KEY` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Recognition language hint.
    pub language: String,

    /// OCR engine number understood by the service.
    pub engine: u8,

    /// Let the service auto-rotate before recognizing.
    pub detect_orientation: bool,

    /// Upscale low-resolution images before recognizing.
    pub scale: bool,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.ocr.space/parse/image".to_string(),
            api_key: None,
            language: "por".to_string(),
            engine: 2,
            // Rotation is driven by the retry controller instead.
            detect_orientation: false,
            scale: true,
            timeout_secs: 60,
        }
    }
}

impl OcrConfig {
    /// The configured API key, else the environment one.
    ///
    /// Blank keys count as missing.
    pub fn resolve_api_key(&self) -> std::result::Result<String, OcrError> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(OcrError::MissingCredentials)
    }
}

/// Confidence thresholds for the orientation retry controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Below this, the 0° attempt is followed by 90° and 270°.
    pub retry_below: u8,

    /// Stop trying orientations once an attempt reaches this.
    pub early_exit_at: u8,

    /// Below this best score, 180° is tried last.
    pub flip_below: u8,

    /// A request succeeds when its best attempt reaches this.
    pub success_at: u8,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            retry_below: 80,
            early_exit_at: 85,
            flip_below: 70,
            success_at: 50,
        }
    }
}

impl DocscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject thresholds outside 0..=100.
    pub fn validate(&self) -> Result<()> {
        let o = &self.orientation;
        for (name, value) in [
            ("orientation.retry_below", o.retry_below),
            ("orientation.early_exit_at", o.early_exit_at),
            ("orientation.flip_below", o.flip_below),
            ("orientation.success_at", o.success_at),
        ] {
            if value > 100 {
                return Err(DocscanError::Config(format!("{name} must be at most 100, got {value}")));
            }
        }
        if self.ocr.timeout_secs == 0 {
            return Err(DocscanError::Config("ocr.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
