//! Civil registry certificate (birth, marriage, death) extractor.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::field::FieldExtractor;
use crate::document::rules::*;
use crate::document::types::DocumentType;

lazy_static! {
    static ref CERTIFICATE_KIND: Regex = Regex::new(
        r"(?i)\bCERTID[AÃ]O\s+DE\s+(NASCIMENTO|CASAMENTO|[OÓ]BITO)\b"
    ).unwrap();

    static ref MATRICULA_LABELED: Regex = Regex::new(
        r"(?i)\bMATR[IÍ]CULA\b[\s:]*((?:\d[\s.\-]?){31}\d)"
    ).unwrap();

    static ref MATRICULA_PLAIN: Regex = Regex::new(r"\b(\d{32})\b").unwrap();
}

const CERTIFICATE_KINDS: [&str; 3] = ["NASCIMENTO", "CASAMENTO", "OBITO"];

/// Certificates are issued from birth onwards, so recent years are valid.
const CERTIFICATE_BIRTH_YEARS: (i32, i32) = (1900, 2030);

const REGISTRY_OFFICE_WORDS: [&str; 3] = ["CARTORIO", "OFICIO", "SERVENTIA"];

/// The line naming the registry office.
fn find_registry_office(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| (5..=120).contains(&line.chars().count()))
        .find(|line| {
            normalize(line)
                .split(' ')
                .any(|token| REGISTRY_OFFICE_WORDS.contains(&token))
        })
        .map(|line| {
            let value = match line.split_once(':') {
                Some((_, rest)) if has_text(rest) => rest,
                _ => line,
            };
            clean_text(value)
        })
}

/// Build the civil registry certificate extractor.
pub fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(DocumentType::Certidao)
        .field(
            FieldExtractor::new("tipo_certidao")
                .required()
                .pattern_with(1, &CERTIFICATE_KIND, normalize)
                .validator(|v| CERTIFICATE_KINDS.contains(&v)),
        )
        .field(name_field())
        .field(
            FieldExtractor::new("matricula")
                .pattern_with(1, &MATRICULA_LABELED, digits_only)
                .pattern(2, &MATRICULA_PLAIN)
                .validator(validate_matricula),
        )
        .field(birth_date_field_within(CERTIFICATE_BIRTH_YEARS))
        .field(father_field())
        .field(mother_field())
        .field(
            FieldExtractor::new("cartorio")
                .heuristic(1, find_registry_office)
                .validator(has_text),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BIRTH_CERTIFICATE: &str = "\
REPÚBLICA FEDERATIVA DO BRASIL
REGISTRO CIVIL DAS PESSOAS NATURAIS
CERTIDÃO DE NASCIMENTO
NOME
LUCAS OLIVEIRA SOUZA
MATRÍCULA
123456 01 55 2015 1 00012 123 0001234 12
DATA DE NASCIMENTO 12/03/2015
FILIAÇÃO
PAI: MARCOS SOUZA
MÃE: JULIANA OLIVEIRA SOUZA
CARTÓRIO DO 1º OFÍCIO DE REGISTRO CIVIL DE CAMPINAS - SP";

    #[test]
    fn test_birth_certificate() {
        let result = extractor().extract(BIRTH_CERTIFICATE, &normalize(BIRTH_CERTIFICATE), &[]);

        assert_eq!(result.get("tipo_certidao").map(String::as_str), Some("NASCIMENTO"));
        assert_eq!(result.get("nome").map(String::as_str), Some("LUCAS OLIVEIRA SOUZA"));
        assert_eq!(
            result.get("matricula").map(String::as_str),
            Some("12345601552015100012123000123412")
        );
        assert_eq!(result.get("data_nascimento").map(String::as_str), Some("12/03/2015"));
        assert_eq!(result.get("nome_pai").map(String::as_str), Some("MARCOS SOUZA"));
        assert_eq!(result.get("nome_mae").map(String::as_str), Some("JULIANA OLIVEIRA SOUZA"));
        assert_eq!(
            result.get("cartorio").map(String::as_str),
            Some("CARTÓRIO DO 1º OFÍCIO DE REGISTRO CIVIL DE CAMPINAS - SP")
        );
    }

    #[test]
    fn test_death_certificate_kind() {
        let raw = "Certidão de Óbito";
        let result = extractor().extract(raw, &normalize(raw), &["tipo_certidao".to_string()]);
        assert_eq!(result.get("tipo_certidao").map(String::as_str), Some("OBITO"));
    }

    #[test]
    fn test_short_matricula_rejected() {
        let raw = "MATRÍCULA 123456 01 55";
        let result = extractor().extract(raw, &normalize(raw), &["matricula".to_string()]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_registry_office_after_label() {
        assert_eq!(
            find_registry_office("Serventia: 2º Registro Civil de Santos"),
            Some("2º REGISTRO CIVIL DE SANTOS".to_string())
        );
        assert_eq!(find_registry_office("nothing"), None);
    }
}
