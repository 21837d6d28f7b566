//! Field declarations shared by several document types.

use lazy_static::lazy_static;
use regex::Regex;

use crate::document::field::FieldExtractor;
use crate::document::rules::patterns::*;
use crate::document::rules::*;
use crate::document::strategy::ExtractionStrategy;

/// Plausible birth years. Disjoint enough from [`ISSUE_YEARS`] that the same
/// date is not taken for both on a card with several dates.
pub const BIRTH_YEARS: (i32, i32) = (1900, 2010);
/// Plausible issuance years.
pub const ISSUE_YEARS: (i32, i32) = (1970, 2030);
/// Plausible expiry years.
pub const EXPIRY_YEARS: (i32, i32) = (1990, 2060);

lazy_static! {
    static ref FILIATION: Regex = Regex::new(r"(?i)\bFILIA[CÇ][AÃ]O\b").unwrap();

    static ref REGISTRATION_DATE: Regex = labeled_date(
        r"DATA\s+D[AE]\s+INSCRI[CÇ][AÃ]O|DATA\s+INSCRI[CÇ][AÃ]O|INSCRI[CÇ][AÃ]O\s+EM|INSCRITO\s+EM"
    );
}

/// Person's full name: `NOME` label, then an upper-case line, then any
/// capitalized name line.
pub fn name_field() -> FieldExtractor {
    FieldExtractor::new("nome")
        .required()
        .strategy(ExtractionStrategy::heuristic(1, find_labeled_name).with_context("labeled"))
        .strategy(ExtractionStrategy::heuristic(2, find_uppercase_name).with_context("uppercase line"))
        .strategy(ExtractionStrategy::heuristic(3, find_full_name).with_context("capitalized line"))
        .validator(is_plausible_name)
}

/// RG number, digits only.
pub fn rg_field() -> FieldExtractor {
    FieldExtractor::new("rg")
        .pattern_with(1, &RG_LABELED, digits_only)
        .pattern_with(2, &RG_LABELED_PLAIN, digits_only)
        .pattern_with(3, &RG_FORMATTED, digits_only)
        .validator(validate_rg)
}

/// CPF number, digits only.
pub fn cpf_field() -> FieldExtractor {
    FieldExtractor::new("cpf")
        .pattern_with(1, &CPF_LABELED, digits_only)
        .pattern_with(2, &CPF_FORMATTED, digits_only)
        .validator(validate_cpf)
}

/// CNPJ number, digits only.
pub fn cnpj_field() -> FieldExtractor {
    FieldExtractor::new("cnpj")
        .pattern_with(1, &CNPJ_LABELED, digits_only)
        .pattern_with(2, &CNPJ_FORMATTED, digits_only)
        .validator(validate_cnpj)
}

/// Postal code formatted as `00000-000`.
pub fn cep_field() -> FieldExtractor {
    FieldExtractor::new("cep")
        .pattern_with(1, &CEP_LABELED, format_cep)
        .pattern_with(2, &CEP_FORMATTED, format_cep)
        .validator(validate_cep)
}

/// Birth date: labeled, else the oldest date in the birth range.
pub fn birth_date_field() -> FieldExtractor {
    birth_date_field_within(BIRTH_YEARS)
}

/// Birth date validated against `years`, for documents issued at birth.
pub fn birth_date_field_within(years: (i32, i32)) -> FieldExtractor {
    let (min, max) = years;
    FieldExtractor::new("data_nascimento")
        .pattern_with(1, &BIRTH_DATE, parse_date_or_raw)
        .heuristic(2, move |text| find_oldest_date_in_range(text, min, max))
        .validator(move |v| is_date_in_range(v, min, max))
}

/// Issuance date: labeled, else the most recent date in the issue range that
/// is not the document's birth date.
pub fn issue_date_field(name: &'static str) -> FieldExtractor {
    let (min, max) = ISSUE_YEARS;
    FieldExtractor::new(name)
        .pattern_with(1, &ISSUE_DATE, parse_date_or_raw)
        .heuristic(2, find_issue_date)
        .validator(move |v| is_date_in_range(v, min, max))
}

/// Most recent issue-range date, skipping the birth-date anchor.
///
/// The anchor is re-derived from the text so issuance never depends on what
/// the birth-date field extracted.
pub fn find_issue_date(text: &str) -> Option<String> {
    let (birth_min, birth_max) = BIRTH_YEARS;
    let (min, max) = ISSUE_YEARS;

    let birth = BIRTH_DATE
        .captures(text)
        .and_then(|caps| parse_date(&caps[1]))
        .or_else(|| find_oldest_date_in_range(text, birth_min, birth_max));

    find_dates(text)
        .into_iter()
        .filter(|d| Some(d) != birth.as_ref())
        .filter(|d| is_date_in_range(d, min, max))
        .max_by_key(|d| dates::date_sort_key(d))
}

/// Date after one of `labels`, validated against `years`.
pub fn labeled_date_field(name: &'static str, labels: &Regex, years: (i32, i32)) -> FieldExtractor {
    let (min, max) = years;
    FieldExtractor::new(name)
        .pattern_with(1, labels, parse_date_or_raw)
        .validator(move |v| is_date_in_range(v, min, max))
}

/// Registration date (`DATA DE INSCRIÇÃO`), validated against the issue range.
pub fn registration_date_field() -> FieldExtractor {
    labeled_date_field("data_inscricao", &REGISTRATION_DATE, ISSUE_YEARS)
}

/// State code, upper-cased.
pub fn uf_field(name: &'static str, pattern: &Regex) -> FieldExtractor {
    FieldExtractor::new(name)
        .pattern_with(1, pattern, |v| v.to_uppercase())
        .validator(is_valid_uf)
}

/// Father's name from a `PAI` label or the first `FILIAÇÃO` line.
pub fn father_field() -> FieldExtractor {
    FieldExtractor::new("nome_pai")
        .heuristic(1, |text| find_name_after(text, &FATHER_LABEL))
        .heuristic(2, |text| find_names_after(text, &FILIATION, 2).into_iter().next())
        .validator(is_plausible_name)
}

/// Mother's name from a `MÃE` label or the second `FILIAÇÃO` line.
pub fn mother_field() -> FieldExtractor {
    FieldExtractor::new("nome_mae")
        .heuristic(1, |text| find_name_after(text, &MOTHER_LABEL))
        .heuristic(2, |text| find_names_after(text, &FILIATION, 2).into_iter().nth(1))
        .validator(is_plausible_name)
}

/// Issuing authority as `ORGAO/UF`, e.g. `SSP/SP`.
pub fn find_issuing_authority(text: &str) -> Option<String> {
    ISSUING_AUTHORITY
        .captures_iter(text)
        .map(|caps| (caps[1].to_uppercase(), caps[2].to_uppercase()))
        .find(|(_, uf)| is_valid_uf(uf))
        .map(|(agency, uf)| format!("{agency}/{uf}"))
}

/// Whether `value` is an `ORGAO/UF` pair with a known state.
pub fn is_issuing_authority(value: &str) -> bool {
    match value.split_once('/') {
        Some((agency, uf)) => !agency.is_empty() && is_valid_uf(uf),
        None => false,
    }
}

/// City and state from a `City - UF` or `City/UF` pair.
pub fn find_city_uf(text: &str) -> Option<(String, String)> {
    CITY_UF.captures_iter(text).find_map(|caps| {
        let uf = caps[2].to_uppercase();
        let city = clean_text(&caps[1]);
        let city = truncate_at_labels(&city, &["CIDADE", "MUNICIPIO", "CEP", "BAIRRO", "UF"]);
        (is_valid_uf(&uf) && city.chars().filter(|c| c.is_alphabetic()).count() >= 3)
            .then_some((city, uf))
    })
}
