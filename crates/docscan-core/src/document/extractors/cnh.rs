//! Driver's license (CNH) extractor.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::field::FieldExtractor;
use crate::document::rules::patterns::{labeled_date, CPF_FORMATTED, CPF_LABELED};
use crate::document::rules::*;
use crate::document::types::DocumentType;

lazy_static! {
    static ref REGISTRATION: Regex = Regex::new(
        r"(?i)\bREGISTRO\b\D{0,20}?(\d{11})\b"
    ).unwrap();

    static ref ELEVEN_DIGITS: Regex = Regex::new(r"\b(\d{11})\b").unwrap();

    static ref CATEGORY: Regex = Regex::new(
        r"(?i)\bCAT(?:EGORIA)?\.?(?:\s+HAB(?:ILITA[CÇ][AÃ]O)?\.?)?[\s:]*([A-E]{1,3})\b"
    ).unwrap();

    static ref EXPIRY_DATE: Regex = labeled_date(r"VALIDADE|V[AÁ]LIDA\s+AT[EÉ]");

    static ref FIRST_LICENSE_DATE: Regex = labeled_date(
        r"1[AªºO]?\s*HABILITA[CÇ][AÃ]O|PRIMEIRA\s+HABILITA[CÇ][AÃ]O"
    );
}

const FIRST_LICENSE_YEARS: (i32, i32) = (1940, 2030);

/// Unlabeled 11-digit run that is not the holder's CPF.
fn find_unlabeled_registration(text: &str) -> Option<String> {
    let cpf = CPF_LABELED
        .captures(text)
        .or_else(|| CPF_FORMATTED.captures(text))
        .map(|caps| digits_only(&caps[1]));

    ELEVEN_DIGITS
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|digits| Some(digits) != cpf.as_ref())
}

/// Build the driver's license extractor.
pub fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(DocumentType::Cnh)
        .field(name_field())
        .field(cpf_field().required())
        .field(rg_field())
        .field(
            FieldExtractor::new("numero_registro")
                .required()
                .pattern(1, &REGISTRATION)
                .heuristic(2, find_unlabeled_registration)
                .validator(validate_cnh_number),
        )
        .field(
            FieldExtractor::new("categoria")
                .pattern_with(1, &CATEGORY, |v| v.to_uppercase())
                .validator(is_valid_cnh_category),
        )
        .field(birth_date_field())
        .field(issue_date_field("data_emissao"))
        .field(labeled_date_field("data_validade", &EXPIRY_DATE, EXPIRY_YEARS))
        .field(labeled_date_field(
            "primeira_habilitacao",
            &FIRST_LICENSE_DATE,
            FIRST_LICENSE_YEARS,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LICENSE: &str = "\
CARTEIRA NACIONAL DE HABILITAÇÃO
NOME
CARLOS EDUARDO MENDES
DOC. IDENTIDADE / ÓRG. EMISSOR / UF
12345678 SSP SP
CPF 987.654.321-00   DATA NASCIMENTO 15/07/1982
Nº REGISTRO 01234567890   VALIDADE 10/10/2028   1ª HABILITAÇÃO 20/01/2001
CAT. HAB. AB
DATA EMISSÃO 10/10/2023";

    #[test]
    fn test_license_fields() {
        let result = extractor().extract(LICENSE, &normalize(LICENSE), &[]);

        assert_eq!(result.get("nome").map(String::as_str), Some("CARLOS EDUARDO MENDES"));
        assert_eq!(result.get("cpf").map(String::as_str), Some("98765432100"));
        assert_eq!(result.get("rg").map(String::as_str), Some("12345678"));
        assert_eq!(result.get("numero_registro").map(String::as_str), Some("01234567890"));
        assert_eq!(result.get("categoria").map(String::as_str), Some("AB"));
        assert_eq!(result.get("data_nascimento").map(String::as_str), Some("15/07/1982"));
        assert_eq!(result.get("data_emissao").map(String::as_str), Some("10/10/2023"));
        assert_eq!(result.get("data_validade").map(String::as_str), Some("10/10/2028"));
        assert_eq!(result.get("primeira_habilitacao").map(String::as_str), Some("20/01/2001"));
    }

    #[test]
    fn test_unlabeled_registration_skips_cpf() {
        let raw = "CPF 98765432100\n01234567890";
        assert_eq!(find_unlabeled_registration(raw), Some("01234567890".to_string()));
        assert_eq!(find_unlabeled_registration("CPF 98765432100"), None);
    }

    #[test]
    fn test_invalid_category_is_dropped() {
        let raw = "CATEGORIA F";
        let result = extractor().extract(raw, &normalize(raw), &["categoria".to_string()]);
        assert!(result.is_empty());
    }
}
