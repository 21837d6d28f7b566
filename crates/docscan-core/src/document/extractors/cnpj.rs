//! Company registration certificate (CNPJ) extractor.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::field::FieldExtractor;
use crate::document::rules::patterns::{labeled_date, UF_LABELED};
use crate::document::rules::*;
use crate::document::types::DocumentType;

lazy_static! {
    static ref LEGAL_NAME: Regex = Regex::new(
        r"(?i)\b(?:NOME\s+EMPRESARIAL|RAZ[AÃ]O\s+SOCIAL)\b[\s:]*([A-Za-zÀ-ÿ0-9][A-Za-zÀ-ÿ0-9&'.,\- ]{2,120})"
    ).unwrap();

    static ref TRADE_NAME: Regex = Regex::new(
        r"(?i)\b(?:NOME\s+DE\s+FANTASIA|NOME\s+FANTASIA)\b\)?[\s:]*([A-Za-zÀ-ÿ0-9*][A-Za-zÀ-ÿ0-9&'.,*\- ]{1,120})"
    ).unwrap();

    static ref OPENING_DATE: Regex = labeled_date(r"DATA\s+DE\s+ABERTURA|ABERTURA");

    static ref REGISTRATION_STATUS: Regex = Regex::new(
        r"(?i)\bSITUA[CÇ][AÃ]O\s+CADASTRAL\b[\s:]*(ATIVA|BAIXADA|SUSPENSA|INAPTA|NULA)\b"
    ).unwrap();
}

const OPENING_YEARS: (i32, i32) = (1900, 2030);

/// Labels that follow the company names on the certificate.
const COMPANY_NAME_STOP: &[&str] = &[
    "TITULO", "PORTE", "CODIGO", "NATUREZA", "LOGRADOURO", "NOME", "CNPJ", "DATA", "SITUACAO",
    "CEP", "ENDERECO", "NUMERO", "ATIVIDADE", "MATRIZ", "FILIAL",
];

fn clean_company_name(value: &str) -> String {
    let name = truncate_at_labels(&clean_text(value), COMPANY_NAME_STOP);
    name.trim_end_matches(|c: char| c == ',' || c == '-' || c == '.' || c.is_whitespace())
        .to_string()
}

fn is_company_name(value: &str) -> bool {
    value.chars().filter(|c| c.is_alphanumeric()).count() >= 2 && !value.contains('*')
}

/// Build the company registration extractor.
pub fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(DocumentType::Cnpj)
        .field(cnpj_field().required())
        .field(
            FieldExtractor::new("razao_social")
                .required()
                .pattern_with(1, &LEGAL_NAME, clean_company_name)
                .validator(is_company_name),
        )
        .field(
            FieldExtractor::new("nome_fantasia")
                .pattern_with(1, &TRADE_NAME, clean_company_name)
                .validator(is_company_name),
        )
        .field(labeled_date_field("data_abertura", &OPENING_DATE, OPENING_YEARS))
        .field(
            FieldExtractor::new("situacao_cadastral")
                .pattern_with(1, &REGISTRATION_STATUS, |v| v.to_uppercase()),
        )
        .field(cep_field())
        .field(uf_field("uf", &UF_LABELED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CERTIFICATE: &str = "\
REPÚBLICA FEDERATIVA DO BRASIL
NÚMERO DE INSCRIÇÃO 12.345.678/0001-95 MATRIZ
COMPROVANTE DE INSCRIÇÃO E DE SITUAÇÃO CADASTRAL
DATA DE ABERTURA 05/04/2010
NOME EMPRESARIAL
EMPRESA EXEMPLO COMERCIO LTDA
TÍTULO DO ESTABELECIMENTO (NOME DE FANTASIA)
LOJA EXEMPLO
LOGRADOURO RUA DAS FLORES NÚMERO 100
CEP 01.310-100 BAIRRO CENTRO MUNICÍPIO SÃO PAULO UF SP
SITUAÇÃO CADASTRAL ATIVA";

    #[test]
    fn test_certificate_fields() {
        let result = extractor().extract(CERTIFICATE, &normalize(CERTIFICATE), &[]);

        assert_eq!(result.get("cnpj").map(String::as_str), Some("12345678000195"));
        assert_eq!(result.get("razao_social").map(String::as_str), Some("EMPRESA EXEMPLO COMERCIO LTDA"));
        assert_eq!(result.get("nome_fantasia").map(String::as_str), Some("LOJA EXEMPLO"));
        assert_eq!(result.get("data_abertura").map(String::as_str), Some("05/04/2010"));
        assert_eq!(result.get("situacao_cadastral").map(String::as_str), Some("ATIVA"));
        assert_eq!(result.get("cep").map(String::as_str), Some("01310-100"));
        assert_eq!(result.get("uf").map(String::as_str), Some("SP"));
    }

    #[test]
    fn test_masked_trade_name_is_absent() {
        let raw = "TÍTULO DO ESTABELECIMENTO (NOME DE FANTASIA)\n********\nPORTE ME";
        let result = extractor().extract(raw, &normalize(raw), &["nome_fantasia".to_string()]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_labeled_cnpj() {
        let raw = "CNPJ: 12 345 678 0001 95";
        let result = extractor().extract(raw, &normalize(raw), &["cnpj".to_string()]);
        assert_eq!(result.get("cnpj").map(String::as_str), Some("12345678000195"));
    }
}
