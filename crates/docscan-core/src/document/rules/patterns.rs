//! Common regex patterns for Brazilian document extraction.
//!
//! Every labeled pattern is case-insensitive and accent-tolerant so it can run
//! against both the normalized text (upper-case, no punctuation) and the raw
//! OCR text.

use lazy_static::lazy_static;
use regex::Regex;

/// Date spellings accepted after a label: numeric with any separator,
/// month names with optional `de`, and compact `DDMMYYYY`.
pub const DATE_CAPTURE: &str = r"(\d{1,2}[/.\- ]\d{1,2}[/.\- ]\d{2,4}|\d{1,2}(?:\s+DE\s+|[\s/\-.]+)?[A-Za-zÀ-ÿ]{3,9}\.?(?:\s+DE\s+|[\s/\-.]+)?\d{4}|\d{8})";

/// Build a pattern capturing the date that follows one of `labels`.
pub fn labeled_date(labels: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{labels})\b\D{{0,12}}?{DATE_CAPTURE}")).unwrap()
}

lazy_static! {
    // Date parsing
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_NUMERIC_SPACED: Regex = Regex::new(
        r"\b(\d{1,2}) (\d{1,2}) (\d{4})\b"
    ).unwrap();

    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:\s+DE\s+|[\s/\-.]+)?([A-Za-zÀ-ÿ]{3,9})\.?(?:\s+DE\s+|[\s/\-.]+)?(\d{4})\b"
    ).unwrap();

    pub static ref DATE_COMPACT: Regex = Regex::new(
        r"\b(\d{2})(\d{2})(\d{4})\b"
    ).unwrap();

    // Labeled dates shared by several document types
    pub static ref BIRTH_DATE: Regex = labeled_date(
        r"DATA\s+DE\s+NASCIMENTO|DATA\s+NASC(?:IMENTO)?|DT\s+NASC|NASCIMENTO|NASCID[OA]\s+EM"
    );

    pub static ref ISSUE_DATE: Regex = labeled_date(
        r"DATA\s+DE\s+EXPEDI[CÇ][AÃ]O|DATA\s+EXPEDI[CÇ][AÃ]O|EXPEDI[CÇ][AÃ]O|DATA\s+DE\s+EMISS[AÃ]O|DATA\s+EMISS[AÃ]O|EMISS[AÃ]O|EXPEDID[AO]\s+EM|EMITID[AO]\s+EM"
    );

    // RG (state identity card number)
    pub static ref RG_LABELED: Regex = Regex::new(
        r"(?i)\b(?:RG|REGISTRO\s+GERAL|CARTEIRA\s+DE\s+IDENTIDADE|DOC(?:UMENTO)?\s+(?:DE\s+)?IDENTIDADE|IDENTIDADE)\b\D{0,25}?(\d{1,2}[.\s]?\d{3}[.\s]?\d{3}(?:[\s\-]?[\dX])?)\b"
    ).unwrap();

    pub static ref RG_LABELED_PLAIN: Regex = Regex::new(
        r"(?i)\b(?:RG|REGISTRO\s+GERAL|IDENTIDADE)\b\D{0,25}?(\d{7,10})\b"
    ).unwrap();

    pub static ref RG_FORMATTED: Regex = Regex::new(
        r"\b(\d{1,2}\.\d{3}\.\d{3}-[\dXx])\b"
    ).unwrap();

    // CPF (individual taxpayer number)
    pub static ref CPF_LABELED: Regex = Regex::new(
        r"(?i)\bCPF\b\D{0,20}?(\d{3}[.\s]?\d{3}[.\s]?\d{3}[\s\-./]?\d{2})\b"
    ).unwrap();

    pub static ref CPF_FORMATTED: Regex = Regex::new(
        r"\b(\d{3}\.\d{3}\.\d{3}-\d{2})\b"
    ).unwrap();

    // CNPJ (corporate taxpayer number)
    pub static ref CNPJ_LABELED: Regex = Regex::new(
        r"(?i)\bCNPJ\b\D{0,20}?(\d{2}[.\s]?\d{3}[.\s]?\d{3}[\s/]?\d{4}[\s\-]?\d{2})\b"
    ).unwrap();

    pub static ref CNPJ_FORMATTED: Regex = Regex::new(
        r"\b(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})\b"
    ).unwrap();

    // CEP (postal code)
    pub static ref CEP_LABELED: Regex = Regex::new(
        r"(?i)\bCEP\b\D{0,5}?(\d{2}[.\s]?\d{3}[\s\-]?\d{3})\b"
    ).unwrap();

    pub static ref CEP_FORMATTED: Regex = Regex::new(
        r"\b(\d{5}-\d{3})\b"
    ).unwrap();

    // Names
    pub static ref NAME_LABELED: Regex = Regex::new(
        r"(?i)\bNOME(?:\s+(?:COMPLETO|CIVIL|SOCIAL|DO\s+PAI|DA\s+M[AÃ]E|DO\s+TITULAR|DO\s+CLIENTE))?\b[\s:]*([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ' ]{2,100})"
    ).unwrap();

    pub static ref PARENT_LABEL: Regex = Regex::new(
        r"(?i)NOME\s+D[OA]\s+(?:PAI|M[AÃ]E)"
    ).unwrap();

    pub static ref FATHER_LABEL: Regex = Regex::new(
        r"(?i)\b(?:NOME\s+DO\s+PAI|PAI)\b"
    ).unwrap();

    pub static ref MOTHER_LABEL: Regex = Regex::new(
        r"(?i)\b(?:NOME\s+DA\s+M[AÃ]E|M[AÃ]E)\b"
    ).unwrap();

    // Issuing authority, e.g. SSP/SP, DETRAN-RJ
    pub static ref ISSUING_AUTHORITY: Regex = Regex::new(
        r"(?i)\b(SSP|SESP|SDS|SJS|SEJUSP|PC|PCMG|IFP|IGP|IIRGD|DETRAN|DGPC|SSPDS|SPTC|POLITEC)\s*[/\-]?\s*([A-Z]{2})\b"
    ).unwrap();

    pub static ref UF_LABELED: Regex = Regex::new(
        r"(?i)\bUF\b[\s:]*([A-Z]{2})\b"
    ).unwrap();

    // City and state, e.g. "São Paulo - SP", "Campinas/SP"
    pub static ref CITY_UF: Regex = Regex::new(
        r"(?i)([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ' ]{1,40}?)\s*[/\-]\s*([A-Z]{2})\b"
    ).unwrap();
}
