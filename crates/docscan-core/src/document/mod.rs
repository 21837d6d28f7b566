//! Rule-based field extraction for Brazilian documents.
//!
//! Each [`DocumentType`] has a [`DocumentExtractor`] made of independent
//! [`FieldExtractor`]s. A field runs its ranked [`ExtractionStrategy`]s
//! against the raw and the normalized text until one produces a value the
//! field's validator accepts.

pub mod confidence;
mod extractor;
pub mod extractors;
mod field;
pub mod registry;
pub mod rules;
mod strategy;
mod types;

pub use extractor::{DocumentExtractor, OcrExtractionResult};
pub use field::FieldExtractor;
pub use registry::{extract_text, registry, ExtractorRegistry, TextExtraction};
pub use strategy::{ExtractionStrategy, HeuristicFn, Matcher, TransformFn, ValidatorFn};
pub use types::DocumentType;
