//! Proof of address (utility bill) extractor.

use lazy_static::lazy_static;
use regex::Regex;

use super::common::*;
use crate::document::extractor::DocumentExtractor;
use crate::document::field::FieldExtractor;
use crate::document::rules::patterns::{labeled_date, UF_LABELED};
use crate::document::rules::*;
use crate::document::strategy::ExtractionStrategy;
use crate::document::types::DocumentType;

lazy_static! {
    static ref HOLDER_LABEL: Regex = Regex::new(
        r"(?i)\b(?:NOME\s+DO\s+(?:CLIENTE|TITULAR)|CLIENTE|TITULAR|DESTINAT[AÁ]RIO)\b"
    ).unwrap();

    static ref STREET: Regex = Regex::new(
        r"(?i)\b(?:RUA|AVENIDA|ALAMEDA|TRAVESSA|ESTRADA|RODOVIA|PRA[CÇ]A|LARGO|AV\.|AV|R\.)\s+[A-Za-zÀ-ÿ0-9]"
    ).unwrap();

    static ref CITY_LABELED: Regex = Regex::new(
        r"(?i)\b(?:CIDADE|MUNIC[IÍ]PIO)\b[\s:]*([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ' ]{2,40})"
    ).unwrap();

    static ref DUE_DATE: Regex = labeled_date(r"DATA\s+DE\s+VENCIMENTO|VENCIMENTO|VENCE\s+EM");
}

const ADDRESS_STOP: &[&str] = &[
    "BAIRRO", "CEP", "CIDADE", "MUNICIPIO", "UF", "VENCIMENTO", "TOTAL", "VALOR", "REFERENCIA",
    "CLIENTE", "CONSUMO", "LEITURA",
];

const CITY_STOP: &[&str] = &["UF", "CEP", "BAIRRO", "ESTADO", "VENCIMENTO", "ENDERECO"];

/// Street line, from the thoroughfare keyword to the next label.
fn find_street_address(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let m = STREET.find(line)?;
        let address = truncate_at_labels(&line[m.start()..], ADDRESS_STOP);
        let address = address.trim_end_matches(|c: char| c == ',' || c == '-' || c.is_whitespace());
        (address.chars().filter(|c| c.is_alphabetic()).count() >= 5).then(|| clean_text(address))
    })
}

fn is_place_name(value: &str) -> bool {
    value.chars().filter(|c| c.is_alphabetic()).count() >= 3
}

/// Build the proof-of-address extractor.
pub fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(DocumentType::ComprovanteEndereco)
        .field(
            FieldExtractor::new("nome")
                .required()
                .strategy(
                    ExtractionStrategy::heuristic(1, |text: &str| find_name_after(text, &HOLDER_LABEL))
                        .with_context("holder label"),
                )
                .strategy(ExtractionStrategy::heuristic(2, find_labeled_name).with_context("labeled"))
                .strategy(ExtractionStrategy::heuristic(3, find_full_name).with_context("capitalized line"))
                .validator(is_plausible_name),
        )
        .field(
            FieldExtractor::new("endereco")
                .required()
                .heuristic(1, find_street_address)
                .validator(has_text),
        )
        .field(cep_field().required())
        .field(
            FieldExtractor::new("cidade")
                .pattern_with(1, &CITY_LABELED, |v| truncate_at_labels(&clean_text(v), CITY_STOP))
                .heuristic(2, |text| find_city_uf(text).map(|(city, _)| city))
                .validator(is_place_name),
        )
        .field(uf_field("uf", &UF_LABELED).heuristic(2, |text| find_city_uf(text).map(|(_, uf)| uf)))
        .field(labeled_date_field("data_vencimento", &DUE_DATE, EXPIRY_YEARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WATER_BILL: &str = "\
COMPANHIA DE SANEAMENTO BÁSICO
CONTA DE ÁGUA
Cliente: Ana Paula de Souza
Endereço: Rua das Flores, 123 - Apto 45
Bairro: Jardim Paulista
CEP: 01310-100
São Paulo - SP
Vencimento: 15/08/2024
Total a pagar R$ 120,50";

    #[test]
    fn test_utility_bill() {
        let result = extractor().extract(WATER_BILL, &normalize(WATER_BILL), &[]);

        assert_eq!(result.get("nome").map(String::as_str), Some("Ana Paula de Souza"));
        assert_eq!(result.get("endereco").map(String::as_str), Some("RUA DAS FLORES, 123 - APTO 45"));
        assert_eq!(result.get("cep").map(String::as_str), Some("01310-100"));
        assert_eq!(result.get("cidade").map(String::as_str), Some("SÃO PAULO"));
        assert_eq!(result.get("uf").map(String::as_str), Some("SP"));
        assert_eq!(result.get("data_vencimento").map(String::as_str), Some("15/08/2024"));
    }

    #[test]
    fn test_street_address_from_normalized_text() {
        let text = "ENDERECO AV PAULISTA 1000 BAIRRO BELA VISTA CEP 01310 100";
        assert_eq!(find_street_address(text), Some("AV PAULISTA 1000".to_string()));
        assert_eq!(find_street_address("Total R$ 10,00"), None);
    }

    #[test]
    fn test_labeled_city() {
        let raw = "MUNICÍPIO: CAMPINAS UF: SP";
        let result = extractor().extract(raw, &normalize(raw), &[]);
        assert_eq!(result.get("cidade").map(String::as_str), Some("CAMPINAS"));
        assert_eq!(result.get("uf").map(String::as_str), Some("SP"));
    }
}
