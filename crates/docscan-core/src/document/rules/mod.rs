//! Shared parsing utilities for Brazilian documents.

pub mod dates;
pub mod names;
pub mod normalize;
pub mod patterns;
pub mod validators;

pub use dates::{
    find_dates, find_latest_date_in_range, find_oldest_date_in_range, is_date_in_range, parse_date,
    parse_date_or_raw,
};
pub use names::{
    clean_name, find_full_name, find_labeled_name, find_name_after, find_names_after, find_uppercase_name,
    is_plausible_name,
};
pub use normalize::{collapse_spaces, digits_only, normalize};
pub use validators::{
    format_cep, format_cnpj, format_cpf, is_valid_cnh_category, is_valid_uf, validate_cep,
    validate_cnh_number, validate_cnpj, validate_cpf, validate_crm, validate_matricula,
    validate_rg,
};

/// Upper-case and collapse whitespace; the usual cleanup for free-text values.
pub fn clean_text(value: &str) -> String {
    collapse_spaces(value).to_uppercase()
}

/// Cut a free-text value at the first of `labels` (compared after folding).
///
/// Labeled values captured from normalized text run on into the next label;
/// this trims them back.
pub fn truncate_at_labels(value: &str, labels: &[&str]) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for token in value.split_whitespace() {
        let folded = normalize::fold_token(token);
        if labels.contains(&folded.as_str()) {
            break;
        }
        kept.push(token);
    }
    kept.join(" ")
}

/// Non-empty after trimming, and not just punctuation.
pub fn has_text(value: &str) -> bool {
    value.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_at_labels() {
        assert_eq!(
            truncate_at_labels("EMPRESA EXEMPLO LTDA TITULO DO ESTABELECIMENTO", &["TITULO"]),
            "EMPRESA EXEMPLO LTDA"
        );
        assert_eq!(truncate_at_labels("Código 123", &["CODIGO"]), "");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  medicina \n do trabalho "), "MEDICINA DO TRABALHO");
    }
}
