//! Document-type tag → extractor lookup.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::confidence;
use super::extractor::{DocumentExtractor, OcrExtractionResult};
use super::extractors;
use super::rules::normalize;
use super::types::DocumentType;

lazy_static! {
    static ref REGISTRY: ExtractorRegistry = ExtractorRegistry::new();
}

/// The process-wide registry. Built on first use, never mutated.
pub fn registry() -> &'static ExtractorRegistry {
    &REGISTRY
}

/// Fields and score for one piece of recognized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtraction {
    /// Tag the caller asked for, as given.
    pub document_type: String,
    /// Extracted fields.
    pub fields: OcrExtractionResult,
    /// Confidence score, 0 to 100.
    pub confidence: u8,
    /// Length of the raw text in characters.
    pub text_length: usize,
}

impl TextExtraction {
    /// Number of extracted fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Immutable map from document type to its extractor.
#[derive(Debug, Clone)]
pub struct ExtractorRegistry {
    extractors: BTreeMap<DocumentType, DocumentExtractor>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorRegistry {
    /// Build extractors for every supported document type.
    pub fn new() -> Self {
        let extractors = DocumentType::ALL
            .into_iter()
            .map(|t| (t, extractors::for_type(t)))
            .collect();
        Self { extractors }
    }

    /// Extractor for a wire tag such as `rg`.
    pub fn get(&self, tag: &str) -> Option<&DocumentExtractor> {
        let document_type = tag.parse::<DocumentType>().ok()?;
        self.get_type(document_type)
    }

    /// Extractor for a parsed document type.
    pub fn get_type(&self, document_type: DocumentType) -> Option<&DocumentExtractor> {
        self.extractors.get(&document_type)
    }

    /// Whether `tag` names a supported document type.
    pub fn supports(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Supported wire tags, in registry order.
    pub fn supported_types(&self) -> Vec<&'static str> {
        self.extractors.keys().map(DocumentType::tag).collect()
    }

    /// Normalize, extract and score `raw` as a document of type `tag`.
    ///
    /// An unsupported tag is not an error: it yields no fields, scored by
    /// the usual formula.
    pub fn extract(&self, tag: &str, raw: &str, expected: &[String]) -> TextExtraction {
        let text_length = raw.chars().count();

        let fields = match self.get(tag) {
            Some(extractor) => extractor.extract(raw, &normalize(raw), expected),
            None => {
                warn!(document_type = tag, "unsupported document type");
                OcrExtractionResult::new()
            }
        };

        let confidence = confidence::score(&fields, expected, text_length);
        debug!(document_type = tag, fields = fields.len(), confidence, "scored extraction");

        TextExtraction {
            document_type: tag.to_string(),
            fields,
            confidence,
            text_length,
        }
    }
}

/// Extract fields from already-recognized text using the global registry.
pub fn extract_text(document_type: &str, raw: &str, expected: &[String]) -> TextExtraction {
    registry().extract(document_type, raw, expected)
}
