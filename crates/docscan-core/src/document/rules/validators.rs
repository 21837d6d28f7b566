//! Structural validation of Brazilian identifiers.
//!
//! These checks are checksum-free: they reject values whose shape cannot be
//! right (wrong length, a single repeated digit, unknown state code) without
//! computing verification digits. OCR noise routinely corrupts a check digit
//! while leaving the rest of the number usable.

use super::normalize::digits_only;

/// The 27 federative units.
pub const UF_CODES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// CNH license categories.
pub const CNH_CATEGORIES: [&str; 10] = ["A", "B", "C", "D", "E", "AB", "AC", "AD", "AE", "ACC"];

const CPF_LENGTH: usize = 11;
const CNPJ_LENGTH: usize = 14;

fn is_repeated_digit(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

fn has_digits(value: &str, len: usize) -> Option<String> {
    let digits = digits_only(value);
    (digits.len() == len && !is_repeated_digit(&digits)).then_some(digits)
}

/// Validate an RG (state-issued national identity number).
///
/// Accepts 7 to 10 digits. Rejects a single repeated digit, and the CPF and
/// CNPJ lengths so a tax ID is never taken for an identity number.
pub fn validate_rg(value: &str) -> bool {
    let digits = digits_only(value);
    let len = digits.len();

    if len == CPF_LENGTH || len == CNPJ_LENGTH {
        return false;
    }

    (7..=10).contains(&len) && !is_repeated_digit(&digits)
}

/// Validate a CPF (individual taxpayer number): 11 digits, not repeated.
pub fn validate_cpf(value: &str) -> bool {
    has_digits(value, CPF_LENGTH).is_some()
}

/// Validate a CNPJ (corporate taxpayer number): 14 digits, not repeated.
pub fn validate_cnpj(value: &str) -> bool {
    has_digits(value, CNPJ_LENGTH).is_some()
}

/// Validate a CEP (postal code): 8 digits.
pub fn validate_cep(value: &str) -> bool {
    let digits = digits_only(value);
    digits.len() == 8 && digits != "00000000"
}

/// Check membership in the set of state codes.
pub fn is_valid_uf(value: &str) -> bool {
    let code = value.trim().to_uppercase();
    UF_CODES.contains(&code.as_str())
}

/// Validate a CNH registration number: 11 digits, not repeated.
pub fn validate_cnh_number(value: &str) -> bool {
    has_digits(value, 11).is_some()
}

/// Validate a CRM (medical council) registration number: 4 to 8 digits.
pub fn validate_crm(value: &str) -> bool {
    let digits = digits_only(value);
    (4..=8).contains(&digits.len()) && !is_repeated_digit(&digits)
}

/// Validate a civil-registry certificate matricula: 32 digits.
pub fn validate_matricula(value: &str) -> bool {
    has_digits(value, 32).is_some()
}

/// Validate a CNH license category.
pub fn is_valid_cnh_category(value: &str) -> bool {
    let category = value.trim().to_uppercase();
    CNH_CATEGORIES.contains(&category.as_str())
}

/// Format a CPF as `000.000.000-00`.
pub fn format_cpf(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() != CPF_LENGTH {
        return value.to_string();
    }
    format!("{}.{}.{}-{}", &digits[0..3], &digits[3..6], &digits[6..9], &digits[9..11])
}

/// Format a CNPJ as `00.000.000/0000-00`.
pub fn format_cnpj(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() != CNPJ_LENGTH {
        return value.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

/// Format a CEP as `00000-000`.
pub fn format_cep(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() != 8 {
        return value.to_string();
    }
    format!("{}-{}", &digits[0..5], &digits[5..8])
}
