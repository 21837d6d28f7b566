//! CPF registration card / proof of registration extractor.

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::types::DocumentType;

/// Build the CPF extractor.
pub fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(DocumentType::Cpf)
        .field(name_field())
        .field(cpf_field().required())
        .field(birth_date_field())
        .field(registration_date_field())
}
