//! Confidence scoring for one extraction attempt.

use super::extractor::OcrExtractionResult;

/// Denominator used when the caller did not list expected fields.
pub const DEFAULT_EXPECTED_FIELDS: usize = 5;

/// Fields whose presence adds a bonus regardless of document type.
pub const CRITICAL_FIELDS: [&str; 5] = ["nome", "cpf", "rg", "cnpj", "crm"];

const CRITICAL_FIELD_BONUS: f64 = 5.0;
const MAX_CRITICAL_BONUS: f64 = 20.0;

/// Multiplier applied to the coverage score for short recognized text.
///
/// Very short text means the OCR pass itself most likely failed, however many
/// fields happened to match.
pub fn text_quality_multiplier(raw_text_length: usize) -> f64 {
    match raw_text_length {
        0..50 => 0.3,
        50..150 => 0.6,
        150..300 => 0.8,
        _ => 1.0,
    }
}

/// Score an extraction from 0 to 100.
///
/// `coverage × text multiplier + critical bonus`, clamped to `0..=100`
/// and then rounded.
pub fn score(extracted: &OcrExtractionResult, expected: &[String], raw_text_length: usize) -> u8 {
    let present = |value: &String| !value.trim().is_empty();

    let valid_fields = extracted.values().filter(|v| present(v)).count();
    let total_expected = if expected.is_empty() {
        DEFAULT_EXPECTED_FIELDS
    } else {
        expected.len()
    };

    let base = valid_fields as f64 / total_expected as f64 * 100.0;
    let scaled = base * text_quality_multiplier(raw_text_length);

    let critical = CRITICAL_FIELDS
        .iter()
        .filter(|name| extracted.get(**name).is_some_and(present))
        .count();
    let bonus = (critical as f64 * CRITICAL_FIELD_BONUS).min(MAX_CRITICAL_BONUS);

    (scaled + bonus).clamp(0.0, 100.0).round() as u8
}
