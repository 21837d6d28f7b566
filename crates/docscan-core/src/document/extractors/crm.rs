//! Medical council card (CRM) extractor.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::field::FieldExtractor;
use crate::document::rules::patterns::UF_LABELED;
use crate::document::rules::*;
use crate::document::types::DocumentType;

lazy_static! {
    static ref CRM_NUMBER: Regex = Regex::new(
        r"(?i)\bCRM\b(?:\s*[/\-]?\s*[A-Z]{2}\b)?\D{0,15}?(\d{1,3}(?:[.\s]\d{3})+|\d{4,8})\b"
    ).unwrap();

    static ref CRM_UF: Regex = Regex::new(r"(?i)\bCRM\s*[/\-]?\s*([A-Z]{2})\b").unwrap();

    static ref SPECIALTY: Regex = Regex::new(
        r"(?i)\bESPECIALIDADES?\b[\s:]*([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ ]{2,60})"
    ).unwrap();
}

const SPECIALTY_STOP: &[&str] = &[
    "CRM", "RQE", "DATA", "INSCRICAO", "CPF", "NOME", "SITUACAO", "UF", "VALIDADE", "REGISTRO",
];

fn clean_specialty(value: &str) -> String {
    truncate_at_labels(&clean_text(value), SPECIALTY_STOP)
}

/// Build the medical council card extractor.
pub fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(DocumentType::Crm)
        .field(name_field())
        .field(
            FieldExtractor::new("crm")
                .required()
                .pattern_with(1, &CRM_NUMBER, digits_only)
                .validator(validate_crm),
        )
        .field(
            FieldExtractor::new("uf_crm")
                .pattern_with(1, &CRM_UF, |v| v.to_uppercase())
                .pattern_with(2, &UF_LABELED, |v| v.to_uppercase())
                .validator(is_valid_uf),
        )
        .field(cpf_field())
        .field(
            FieldExtractor::new("especialidade")
                .pattern_with(1, &SPECIALTY, clean_specialty)
                .validator(|v| v.chars().filter(|c| c.is_alphabetic()).count() >= 3),
        )
        .field(registration_date_field())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_council_card() {
        let raw = "\
CONSELHO REGIONAL DE MEDICINA DO ESTADO DE SÃO PAULO
CARTEIRA DE IDENTIDADE MÉDICA
NOME: RICARDO ALVES TEIXEIRA
CRM/SP 123456
ESPECIALIDADE: CARDIOLOGIA
CPF: 111.444.777-35
DATA DE INSCRIÇÃO: 15/03/2008";

        let result = extractor().extract(raw, &normalize(raw), &[]);

        assert_eq!(result.get("nome").map(String::as_str), Some("RICARDO ALVES TEIXEIRA"));
        assert_eq!(result.get("crm").map(String::as_str), Some("123456"));
        assert_eq!(result.get("uf_crm").map(String::as_str), Some("SP"));
        assert_eq!(result.get("especialidade").map(String::as_str), Some("CARDIOLOGIA"));
        assert_eq!(result.get("cpf").map(String::as_str), Some("11144477735"));
        assert_eq!(result.get("data_inscricao").map(String::as_str), Some("15/03/2008"));
    }

    #[test]
    fn test_grouped_crm_number() {
        let raw = "CRM-RJ 52.123";
        let result = extractor().extract(raw, &normalize(raw), &[]);
        assert_eq!(result.get("crm").map(String::as_str), Some("52123"));
        assert_eq!(result.get("uf_crm").map(String::as_str), Some("RJ"));
    }

    #[test]
    fn test_short_crm_rejected() {
        let raw = "CRM 123";
        let result = extractor().extract(raw, &normalize(raw), &["crm".to_string()]);
        assert!(result.is_empty());
    }
}
