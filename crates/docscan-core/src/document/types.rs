//! Document type tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DocscanError;

/// A category of source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Registro Geral, the state-issued identity card.
    Rg,
    /// Carteira Nacional de Habilitação, the driver's license.
    Cnh,
    /// CPF card or registration proof.
    Cpf,
    /// Medical council (CRM) professional license.
    Crm,
    /// CNPJ registration proof.
    Cnpj,
    /// Higher-education diploma.
    Diploma,
    /// Civil registry certificate (birth, marriage, death).
    Certidao,
    /// Proof of address (utility bill, bank statement).
    ComprovanteEndereco,
}

impl DocumentType {
    /// Every supported type, in registry order.
    pub const ALL: [DocumentType; 8] = [
        DocumentType::Rg,
        DocumentType::Cnh,
        DocumentType::Cpf,
        DocumentType::Crm,
        DocumentType::Cnpj,
        DocumentType::Diploma,
        DocumentType::Certidao,
        DocumentType::ComprovanteEndereco,
    ];

    /// Wire tag, e.g. `comprovante_endereco`.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentType::Rg => "rg",
            DocumentType::Cnh => "cnh",
            DocumentType::Cpf => "cpf",
            DocumentType::Crm => "crm",
            DocumentType::Cnpj => "cnpj",
            DocumentType::Diploma => "diploma",
            DocumentType::Certidao => "certidao",
            DocumentType::ComprovanteEndereco => "comprovante_endereco",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Rg => "identity card (RG)",
            DocumentType::Cnh => "driver's license (CNH)",
            DocumentType::Cpf => "tax ID (CPF)",
            DocumentType::Crm => "medical license (CRM)",
            DocumentType::Cnpj => "corporate ID (CNPJ)",
            DocumentType::Diploma => "diploma",
            DocumentType::Certidao => "civil certificate",
            DocumentType::ComprovanteEndereco => "proof of address",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentType {
    type Err = DocscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        DocumentType::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| DocscanError::UnknownDocumentType(s.to_string()))
    }
}
