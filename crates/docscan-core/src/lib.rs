//! Core library for Brazilian identity document OCR.
//!
//! This crate provides:
//! - Text normalization for noisy OCR output
//! - Check-digit validators and formatters (CPF, CNPJ, RG, CEP, CNH, CRM)
//! - Rule-based field extraction for eight document types
//! - Confidence scoring of extraction results
//! - An OCR service client and a multi-orientation retry loop

pub mod document;
pub mod error;
pub mod models;
pub mod ocr;

pub use document::{
    extract_text, registry, DocumentExtractor, DocumentType, ExtractorRegistry, FieldExtractor,
    OcrExtractionResult, TextExtraction,
};
pub use error::{DocscanError, OcrError, Result};
pub use models::{DocscanConfig, ExtractionRequest, ExtractionResponse, OcrConfig, OrientationConfig};
pub use ocr::{DocumentProcessor, OcrService, Orientation, OrientationRetry, RecognizedText};

#[cfg(feature = "native")]
pub use ocr::OcrSpaceClient;
