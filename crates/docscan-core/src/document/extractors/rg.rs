//! Identity card (RG) extractor.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::field::FieldExtractor;
use crate::document::rules::*;
use crate::document::types::DocumentType;

lazy_static! {
    static ref BIRTHPLACE: Regex = Regex::new(
        r"(?i)\bNATURALIDADE\b[\s:]*([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ' ]{2,40})"
    ).unwrap();
}

const BIRTHPLACE_STOP: &[&str] = &[
    "DATA", "DOC", "CPF", "RG", "FILIACAO", "NASCIMENTO", "ASSINATURA", "EXPEDICAO", "ORGAO",
];

fn clean_birthplace(value: &str) -> String {
    let city = truncate_at_labels(&clean_text(value), BIRTHPLACE_STOP);
    let mut tokens: Vec<&str> = city.split_whitespace().collect();
    if tokens.len() > 1 && tokens.last().is_some_and(|t| is_valid_uf(t)) {
        tokens.pop();
    }
    tokens.join(" ")
}

/// Build the identity card extractor.
pub fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(DocumentType::Rg)
        .field(name_field())
        .field(rg_field().required())
        .field(cpf_field())
        .field(birth_date_field().required())
        .field(issue_date_field("data_emissao"))
        .field(
            FieldExtractor::new("orgao_emissor")
                .heuristic(1, find_issuing_authority)
                .validator(is_issuing_authority),
        )
        .field(father_field())
        .field(mother_field())
        .field(
            FieldExtractor::new("naturalidade")
                .pattern_with(1, &BIRTHPLACE, clean_birthplace)
                .validator(|v| v.chars().filter(|c| c.is_alphabetic()).count() >= 3),
        )
}
