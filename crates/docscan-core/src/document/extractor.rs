//! Per-document-type extraction loop.

use std::collections::BTreeMap;

use tracing::debug;

use super::field::FieldExtractor;
use super::types::DocumentType;

/// Field name → extracted value. Only found, validator-passing fields are
/// present; a missing key means "not found", never an empty string.
pub type OcrExtractionResult = BTreeMap<String, String>;

/// Declared fields for one document type.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    document_type: DocumentType,
    fields: Vec<FieldExtractor>,
}

impl DocumentExtractor {
    /// Create an extractor with no fields.
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            fields: Vec::new(),
        }
    }

    /// Append a field. Declaration order is preserved.
    pub fn field(mut self, field: FieldExtractor) -> Self {
        self.fields.push(field);
        self
    }

    /// The document type this extractor serves.
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Declared fields in order.
    pub fn fields(&self) -> &[FieldExtractor] {
        &self.fields
    }

    /// Declared field names in order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(FieldExtractor::name).collect()
    }

    /// Extract every declared field, or only `expected` ones when non-empty.
    ///
    /// Fields are independent: each one re-derives its anchors from the text,
    /// so the result does not depend on evaluation order.
    pub fn extract(&self, raw: &str, normalized: &str, expected: &[String]) -> OcrExtractionResult {
        let mut result = OcrExtractionResult::new();

        if raw.trim().is_empty() && normalized.trim().is_empty() {
            return result;
        }

        for field in &self.fields {
            if !expected.is_empty() && !expected.iter().any(|e| e == field.name()) {
                continue;
            }

            if let Some(value) = field.extract(raw, normalized) {
                result.insert(field.name().to_string(), value);
            }
        }

        debug!(
            document_type = %self.document_type,
            "extracted {} of {} fields",
            result.len(),
            self.fields.len()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::rules::patterns::CPF_LABELED;
    use crate::document::rules::normalize::{digits_only, normalize};
    use crate::document::rules::validators::validate_cpf;
    use crate::document::strategy::ExtractionStrategy;
    use pretty_assertions::assert_eq;

    fn sample() -> DocumentExtractor {
        DocumentExtractor::new(DocumentType::Cpf)
            .field(
                FieldExtractor::new("cpf")
                    .pattern_with(1, &CPF_LABELED, digits_only)
                    .validator(validate_cpf),
            )
            .field(FieldExtractor::new("marker").strategy(
                ExtractionStrategy::heuristic(1, |t: &str| t.contains("MARK").then(|| "yes".to_string())),
            ))
    }

    #[test]
    fn test_extract_all_fields() {
        let raw = "CPF: 123.456.789-09 MARK";
        let result = sample().extract(raw, &normalize(raw), &[]);
        assert_eq!(result.get("cpf").map(String::as_str), Some("12345678909"));
        assert_eq!(result.get("marker").map(String::as_str), Some("yes"));
    }

    #[test]
    fn test_expected_fields_filter() {
        let raw = "CPF: 123.456.789-09 MARK";
        let result = sample().extract(raw, &normalize(raw), &["marker".to_string()]);
        assert_eq!(result.len(), 1);
        assert!(result.contains_key("marker"));
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        assert!(sample().extract("", "", &[]).is_empty());
        assert!(sample().extract("   \n", "", &[]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let raw = "CPF 123 456 789 09\nMARK";
        let normalized = normalize(raw);
        let extractor = sample();
        let first = extractor.extract(raw, &normalized, &[]);
        for _ in 0..5 {
            assert_eq!(extractor.extract(raw, &normalized, &[]), first);
        }
    }

    #[test]
    fn test_field_names() {
        assert_eq!(sample().field_names(), vec!["cpf", "marker"]);
    }
}
