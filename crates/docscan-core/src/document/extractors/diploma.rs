//! University diploma extractor.
//!
//! Diplomas are prose rather than labeled forms: the graduate's name follows
//! the "confere a" formula, the course and degree sit in the same sentence.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::field::FieldExtractor;
use crate::document::rules::patterns::DATE_CAPTURE;
use crate::document::rules::*;
use crate::document::strategy::ExtractionStrategy;
use crate::document::types::DocumentType;

lazy_static! {
    static ref CONFERRED_TO: Regex = Regex::new(
        r"(?i)\bCONFERE\b(?:[^\n]{0,60}?\s)?(?:A|AO|À)\s+"
    ).unwrap();

    static ref COURSE: Regex = Regex::new(
        r"(?i)\bCURSO\s+(?:SUPERIOR\s+)?(?:DE\s+)?(?:GRADUA[CÇ][AÃ]O\s+)?(?:(?:BACHARELADO|LICENCIATURA)\s+)?(?:EM\s+)?([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ ]{2,60})"
    ).unwrap();

    static ref DEGREE_IN: Regex = Regex::new(
        r"(?i)\b(?:BACHAREL|LICENCIAD[OA]|TECN[OÓ]LOG[OA]|MESTRE|DOUTORA?)\s+EM\s+([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ ]{2,60})"
    ).unwrap();

    static ref DEGREE: Regex = Regex::new(
        r"(?i)\b(BACHAREL|LICENCIAD[OA]|TECN[OÓ]LOG[OA]|MESTRE|DOUTORA?)\b"
    ).unwrap();

    static ref INSTITUTION: Regex = Regex::new(
        r"(?i)\b((?:UNIVERSIDADE|FACULDADES?|INSTITUTO|CENTRO\s+UNIVERSIT[AÁ]RIO|ESCOLA|FUNDA[CÇ][AÃ]O|PONTIF[IÍ]CIA)[A-Za-zÀ-ÿ ]{3,100})"
    ).unwrap();

    static ref COMPLETION_DATE: Regex = Regex::new(&format!(
        r"(?i)\b(?:CONCLU[IÍ]DO|CONCLUS[AÃ]O|COLOU\s+GRAU|COLA[CÇ][AÃ]O\s+DE\s+GRAU)\b[^\d\n]{{0,60}}?{DATE_CAPTURE}"
    )).unwrap();

    static ref REGISTRATION: Regex = Regex::new(
        r"(?i)\b(?:REGISTRAD[OA]\s+SOB|REGISTRO)\b\D{0,15}?(\d[\d./\- ]{0,20}\d)"
    ).unwrap();
}

const COMPLETION_YEARS: (i32, i32) = (1950, 2030);

const COURSE_STOP: &[&str] = &[
    "EM", "REALIZADO", "CONCLUIDO", "NA", "NO", "PELA", "PELO", "COM", "DATA", "GRAU", "REGISTRO",
    "NIVEL", "POR", "TENDO",
];

const INSTITUTION_STOP: &[&str] = &[
    "NO", "CONFERE", "TENDO", "POR", "CREDENCIADA", "CREDENCIADO", "RECONHECIDA", "RECONHECIDO",
    "REGISTRO", "DIPLOMA", "CNPJ", "CURSO", "MANTIDA", "MANTIDO", "USO", "A", "O",
];

fn is_upper_word(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

/// Upper-case name following the "confere a" formula.
fn find_conferred_name(text: &str) -> Option<String> {
    let m = CONFERRED_TO.find(text)?;
    let tokens: Vec<&str> = text[m.end()..]
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c == ',' || c == ':' || c == ';'))
        .take_while(|t| is_upper_word(t))
        .collect();

    let name = clean_name(&tokens.join(" "));
    is_plausible_name(&name).then_some(name)
}

fn clean_course(value: &str) -> String {
    truncate_at_labels(&clean_text(value), COURSE_STOP)
}

fn has_words(value: &str, min: usize) -> bool {
    value.split_whitespace().count() >= min && value.chars().filter(|c| c.is_alphabetic()).count() >= 3
}

/// Build the diploma extractor.
pub fn extractor() -> DocumentExtractor {
    let (min, max) = COMPLETION_YEARS;

    DocumentExtractor::new(DocumentType::Diploma)
        .field(
            FieldExtractor::new("nome")
                .required()
                .strategy(ExtractionStrategy::heuristic(1, find_conferred_name).with_context("conferred"))
                .strategy(ExtractionStrategy::heuristic(2, find_labeled_name).with_context("labeled"))
                .strategy(ExtractionStrategy::heuristic(3, find_uppercase_name).with_context("uppercase line"))
                .validator(is_plausible_name),
        )
        .field(
            FieldExtractor::new("curso")
                .required()
                .pattern_with(1, &COURSE, clean_course)
                .pattern_with(2, &DEGREE_IN, clean_course)
                .validator(|v| has_words(v, 1)),
        )
        .field(
            FieldExtractor::new("grau")
                .pattern_with(1, &DEGREE, normalize)
                .validator(|v| has_words(v, 1)),
        )
        .field(
            FieldExtractor::new("instituicao")
                .pattern_with(1, &INSTITUTION, |v| truncate_at_labels(&clean_text(v), INSTITUTION_STOP))
                .validator(|v| has_words(v, 2)),
        )
        .field(
            FieldExtractor::new("data_conclusao")
                .pattern_with(1, &COMPLETION_DATE, parse_date_or_raw)
                .validator(move |v| is_date_in_range(v, min, max)),
        )
        .field(
            FieldExtractor::new("registro")
                .pattern_with(1, &REGISTRATION, digits_only)
                .validator(|v| (3..=20).contains(&v.len())),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DIPLOMA: &str = "\
UNIVERSIDADE FEDERAL DE MINAS GERAIS
DIPLOMA
A Reitora da Universidade Federal de Minas Gerais, no uso de suas atribuições, confere a
PATRICIA GOMES FERREIRA
o título de Bacharel em Direito, por ter concluído o curso de Direito em 15 de dezembro de 2018.
Belo Horizonte, 10 de março de 2019.
Registro nº 4521, Livro 12";

    #[test]
    fn test_diploma_fields() {
        let result = extractor().extract(DIPLOMA, &normalize(DIPLOMA), &[]);

        assert_eq!(result.get("nome").map(String::as_str), Some("PATRICIA GOMES FERREIRA"));
        assert_eq!(result.get("curso").map(String::as_str), Some("DIREITO"));
        assert_eq!(result.get("grau").map(String::as_str), Some("BACHAREL"));
        assert_eq!(result.get("instituicao").map(String::as_str), Some("UNIVERSIDADE FEDERAL DE MINAS GERAIS"));
        assert_eq!(result.get("data_conclusao").map(String::as_str), Some("15/12/2018"));
        assert_eq!(result.get("registro").map(String::as_str), Some("4521"));
    }

    #[test]
    fn test_conferred_name_stops_at_lowercase() {
        let text = "confere ao JOSÉ DA COSTA LIMA, o grau de Mestre";
        assert_eq!(find_conferred_name(text), Some("JOSÉ DA COSTA LIMA".to_string()));
        assert_eq!(find_conferred_name("confere a maria"), None);
    }
}
