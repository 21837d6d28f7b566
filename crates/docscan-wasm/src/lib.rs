//! WASM bindings for Brazilian document field extraction.
//!
//! OCR runs elsewhere (browser engine or a server); these bindings take the
//! recognized text and return the structured fields.

use wasm_bindgen::prelude::*;

use docscan_core::document::rules;
use docscan_core::{extract_text, registry, DocumentType};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract fields from recognized text.
///
/// Returns `{ documentType, fields, confidence, textLength }`. An empty or
/// missing `expected_fields` extracts every field of the type.
#[wasm_bindgen]
pub fn extract_fields_from_text(
    document_type: &str,
    text: &str,
    expected_fields: Option<Vec<String>>,
) -> Result<JsValue, JsValue> {
    let expected = expected_fields.unwrap_or_default();
    let extraction = extract_text(document_type, text, &expected);

    serde_wasm_bindgen::to_value(&extraction).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Same as [`extract_fields_from_text`], serialized as a JSON string.
#[wasm_bindgen]
pub fn extract_fields_json(document_type: &str, text: &str) -> Result<String, JsValue> {
    let extraction = extract_text(document_type, text, &[]);
    serde_json::to_string(&extraction).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Wire tags of the supported document types.
#[wasm_bindgen]
pub fn supported_types() -> Vec<String> {
    registry()
        .supported_types()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Field names declared for `document_type`.
#[wasm_bindgen]
pub fn document_fields(document_type: &str) -> Result<Vec<String>, JsValue> {
    let extractor = registry()
        .get(document_type)
        .ok_or_else(|| JsValue::from_str(&format!("unsupported document type: {document_type}")))?;

    Ok(extractor.field_names().into_iter().map(str::to_string).collect())
}

/// Validate a CPF (individual taxpayer number).
#[wasm_bindgen]
pub fn validate_cpf(cpf: &str) -> bool {
    rules::validate_cpf(cpf)
}

/// Validate a CNPJ (company registration number).
#[wasm_bindgen]
pub fn validate_cnpj(cnpj: &str) -> bool {
    rules::validate_cnpj(cnpj)
}

/// Validate an RG number.
#[wasm_bindgen]
pub fn validate_rg(rg: &str) -> bool {
    rules::validate_rg(rg)
}

/// Validate a CEP (postal code).
#[wasm_bindgen]
pub fn validate_cep(cep: &str) -> bool {
    rules::validate_cep(cep)
}

/// Parse a date in any supported layout into `DD/MM/YYYY`.
#[wasm_bindgen]
pub fn parse_date(text: &str) -> Option<String> {
    rules::parse_date(text)
}

/// Normalize noisy OCR text the way extraction sees it.
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    rules::normalize(text)
}

/// Extractor bound to one document type, for repeated browser use.
#[wasm_bindgen]
pub struct DocumentScanner {
    document_type: DocumentType,
    expected_fields: Vec<String>,
}

#[wasm_bindgen]
impl DocumentScanner {
    /// Create a scanner for `document_type`, e.g. `"rg"`.
    #[wasm_bindgen(constructor)]
    pub fn new(document_type: &str) -> Result<DocumentScanner, JsValue> {
        let document_type = document_type
            .parse::<DocumentType>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            document_type,
            expected_fields: Vec::new(),
        })
    }

    /// Wire tag of the bound document type.
    #[wasm_bindgen(getter)]
    pub fn document_type(&self) -> String {
        self.document_type.tag().to_string()
    }

    /// Restrict extraction to these fields; empty means all.
    #[wasm_bindgen]
    pub fn set_expected_fields(&mut self, fields: Vec<String>) {
        self.expected_fields = fields;
    }

    /// Extract fields from recognized text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let extraction = extract_text(self.document_type.tag(), text, &self.expected_fields);
        serde_wasm_bindgen::to_value(&extraction).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Formatting helpers for Brazilian identifiers.
#[wasm_bindgen]
pub struct BrazilianDocumentUtils;

#[wasm_bindgen]
impl BrazilianDocumentUtils {
    /// Format CPF as XXX.XXX.XXX-XX.
    #[wasm_bindgen]
    pub fn format_cpf(cpf: &str) -> String {
        rules::format_cpf(cpf)
    }

    /// Format CNPJ as XX.XXX.XXX/XXXX-XX.
    #[wasm_bindgen]
    pub fn format_cnpj(cnpj: &str) -> String {
        rules::format_cnpj(cnpj)
    }

    /// Format CEP as XXXXX-XXX.
    #[wasm_bindgen]
    pub fn format_cep(cep: &str) -> String {
        rules::format_cep(cep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_validate_cpf() {
        assert!(validate_cpf("123.456.789-09"));
        assert!(!validate_cpf("111.111.111-11"));
    }

    #[wasm_bindgen_test]
    fn test_format_cpf() {
        assert_eq!(BrazilianDocumentUtils::format_cpf("12345678909"), "123.456.789-09");
    }

    #[wasm_bindgen_test]
    fn test_supported_types() {
        assert_eq!(supported_types().len(), 8);
        assert_eq!(document_type_fields("cpf"), vec!["nome", "cpf", "data_nascimento", "data_inscricao"]);
    }

    #[wasm_bindgen_test]
    fn test_extract_json() {
        let json = extract_fields_json("cpf", "NOME: MARIA DA SILVA SANTOS\nCPF: 123.456.789-09").unwrap();
        assert!(json.contains("\"cpf\":\"12345678909\""));
    }

    fn document_type_fields(tag: &str) -> Vec<&'static str> {
        registry().get(tag).map(|e| e.field_names()).unwrap_or_default()
    }
}
