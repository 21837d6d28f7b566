//! Text canonicalization used as the secondary matching surface.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize recognized text for diacritic-insensitive matching.
///
/// Upper-cases, strips combining marks, replaces every character that is not
/// a word character or whitespace with a space, collapses whitespace runs and
/// trims. `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a single token for stop-word comparison.
pub(crate) fn fold_token(token: &str) -> String {
    normalize(token).replace(' ', "")
}

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Collapse internal whitespace runs to a single space.
pub fn collapse_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_strips_diacritics_and_punctuation() {
        assert_eq!(normalize("Órgão Expedidor: SSP/SP"), "ORGAO EXPEDIDOR SSP SP");
        assert_eq!(normalize("  São   Paulo\n-\tSP "), "SAO PAULO SP");
        assert_eq!(normalize("RG: 12.345.678-9"), "RG 12 345 678 9");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert_eq!(normalize("--//.."), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "Filiação: José da Conceição\nMãe: Ana",
            "DATA DE EXPEDIÇÃO 20/11/2021",
            "straße ǰ ǅ ﬁ Ωmega",
            "12.345.678-9 ### ¿qué?",
            "",
            "ÇÃÕÉÍ çãõéí",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("12.345.678-9"), "123456789");
        assert_eq!(digits_only("abc"), "");
    }
}
