//! Field declarations for each supported document type.

pub mod common;

mod address;
mod certidao;
mod cnh;
mod cnpj;
mod cpf;
mod crm;
mod diploma;
mod rg;

use super::extractor::DocumentExtractor;
use super::types::DocumentType;

/// Build the extractor for `document_type`.
pub fn for_type(document_type: DocumentType) -> DocumentExtractor {
    match document_type {
        DocumentType::Rg => rg::extractor(),
        DocumentType::Cnh => cnh::extractor(),
        DocumentType::Cpf => cpf::extractor(),
        DocumentType::Crm => crm::extractor(),
        DocumentType::Cnpj => cnpj::extractor(),
        DocumentType::Diploma => diploma::extractor(),
        DocumentType::Certidao => certidao::extractor(),
        DocumentType::ComprovanteEndereco => address::extractor(),
    }
}
