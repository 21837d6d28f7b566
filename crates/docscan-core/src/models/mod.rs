//! Data models for configuration and the request boundary.

pub mod config;
pub mod request;

pub use config::{DocscanConfig, OcrConfig, OrientationConfig};
pub use request::{ExtractionRequest, ExtractionResponse};
