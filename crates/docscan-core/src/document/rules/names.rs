//! Heuristics for locating personal names in recognized text.

use regex::Regex;

use super::normalize::{collapse_spaces, fold_token};
use super::patterns::{NAME_LABELED, PARENT_LABEL};

/// Lower-case connectors that may appear inside Portuguese names.
const PARTICLES: [&str; 7] = ["DA", "DE", "DO", "DAS", "DOS", "E", "D"];

/// Field labels that commonly follow a name on the same OCR line.
const STOP_TOKENS: &[&str] = &[
    "RG", "CPF", "CNH", "CRM", "CNPJ", "DATA", "NASCIMENTO", "NASC", "DN", "FILIACAO",
    "NATURALIDADE", "NACIONALIDADE", "DOC", "IDENTIDADE", "REGISTRO", "GERAL", "ORGAO", "ORG",
    "EMISSOR", "EXPEDIDOR", "EXPEDICAO", "EMISSAO", "VALIDADE", "CATEGORIA", "CAT",
    "HABILITACAO", "ENDERECO", "CEP", "SEXO", "ASSINATURA", "PAI", "MAE", "NUMERO", "N", "NO",
    "UF", "CIDADE", "LOCAL", "INSCRICAO", "MATRICULA", "CURSO", "CONCLUSAO", "ESPECIALIDADE",
    "PERMISSAO", "OBSERVACOES", "TITULO", "CODIGO", "VENCIMENTO", "REFERENCIA", "RUA", "AVENIDA",
    "AV", "BAIRRO", "TELEFONE", "EMAIL", "NOME", "FILHO", "FILHA", "NASCIDO", "NASCIDA",
    "PORTADOR", "PORTADORA", "GRAU", "SITUACAO", "CLIENTE", "TITULAR", "HORA", "TERMO",
];

/// Words from document headers that never belong to a person's name.
const HEADER_TOKENS: &[&str] = &[
    "REPUBLICA", "FEDERATIVA", "BRASIL", "MINISTERIO", "SECRETARIA", "SEGURANCA", "PUBLICA",
    "INSTITUTO", "IDENTIFICACAO", "CARTEIRA", "NACIONAL", "DEPARTAMENTO", "TRANSITO", "GOVERNO",
    "RECEITA", "FEDERAL", "CERTIDAO", "CARTORIO", "OFICIO", "UNIVERSIDADE", "FACULDADE",
    "DIPLOMA", "CONSELHO", "REGIONAL", "MEDICINA", "COMPROVANTE", "FATURA", "CONTA", "VALIDA",
    "TODO", "TERRITORIO", "POLICIA", "CIVIL", "DETRAN", "CADASTRO", "PESSOAS", "FISICAS",
    "JURIDICA", "CADASTRAL", "ENERGIA", "ELETRICA", "AGUA", "SANEAMENTO", "NATURAIS", "LTDA",
    "EIRELI", "CIA", "MEDICO", "BACHAREL", "CENTRO",
];

fn is_particle(folded: &str) -> bool {
    PARTICLES.contains(&folded)
}

fn is_stop(folded: &str) -> bool {
    STOP_TOKENS.contains(&folded)
}

fn is_header(folded: &str) -> bool {
    HEADER_TOKENS.contains(&folded)
}

fn is_name_token(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_alphabetic() || c == '\'' || c == '-' || c == '.')
        && token.chars().any(|c| c.is_alphabetic())
}

/// Cut a captured name at the first field label and drop dangling particles.
///
/// `"MARIA DA SILVA SANTOS RG "` becomes `"MARIA DA SILVA SANTOS"`.
pub fn clean_name(value: &str) -> String {
    let mut tokens: Vec<&str> = Vec::new();

    for token in value.split_whitespace() {
        let token = token.trim_matches(|c: char| c == ':' || c == ',' || c == ';');
        if token.is_empty() {
            continue;
        }
        if is_stop(&fold_token(token)) {
            break;
        }
        tokens.push(token);
    }

    while tokens.first().is_some_and(|t| is_particle(&fold_token(t))) {
        tokens.remove(0);
    }
    while tokens.last().is_some_and(|t| is_particle(&fold_token(t))) {
        tokens.pop();
    }

    collapse_spaces(&tokens.join(" "))
}

/// Whether `value` looks like a full personal name.
///
/// At least two name tokens (particles excluded), letters only, no field
/// labels or header words, 5 to 100 characters.
pub fn is_plausible_name(value: &str) -> bool {
    let value = value.trim();
    let len = value.chars().count();
    if !(5..=100).contains(&len) || value.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 10 {
        return false;
    }

    let mut name_tokens = 0;
    for token in &tokens {
        if !is_name_token(token) {
            return false;
        }
        let folded = fold_token(token);
        if is_stop(&folded) || is_header(&folded) {
            return false;
        }
        if !is_particle(&folded) {
            name_tokens += 1;
        }
    }

    name_tokens >= 2
}

/// Name following a `NOME` label, skipping parent labels such as `NOME DO PAI`.
pub fn find_labeled_name(text: &str) -> Option<String> {
    for caps in NAME_LABELED.captures_iter(text) {
        let Some(label) = caps.get(0) else { continue };
        if PARENT_LABEL.is_match(label.as_str()) {
            continue;
        }
        let name = clean_name(&caps[1]);
        if is_plausible_name(&name) {
            return Some(name);
        }
    }
    None
}

/// Name that follows `anchor`, on the same line or the next non-empty one.
pub fn find_name_after(text: &str, anchor: &Regex) -> Option<String> {
    for m in anchor.find_iter(text) {
        let rest = &text[m.end()..];
        let mut lines = rest.lines();

        let same_line = lines.next().unwrap_or("");
        let candidate = clean_name(value_part(same_line));
        if is_plausible_name(&candidate) {
            return Some(candidate);
        }
        if !candidate.is_empty() {
            continue;
        }

        if let Some(next) = lines.map(str::trim).find(|l| !l.is_empty()) {
            let candidate = clean_name(value_part(next));
            if is_plausible_name(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Up to `max` names on the lines following `anchor`, e.g. the two parents
/// listed under `FILIAÇÃO`.
pub fn find_names_after(text: &str, anchor: &Regex, max: usize) -> Vec<String> {
    let Some(m) = anchor.find(text) else {
        return Vec::new();
    };

    let mut lines = text[m.end()..].lines();
    let mut names = Vec::new();

    let first = clean_name(value_part(lines.next().unwrap_or("")));
    if is_plausible_name(&first) {
        names.push(first);
    }

    for line in lines.map(str::trim).filter(|l| !l.is_empty()) {
        if names.len() >= max {
            break;
        }
        let candidate = clean_name(value_part(line));
        if !is_plausible_name(&candidate) {
            break;
        }
        names.push(candidate);
    }

    names.truncate(max);
    names
}

fn value_part(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
    line.split(|c: char| c.is_ascii_digit() || c == '|' || c == '/')
        .next()
        .unwrap_or("")
}

/// First line made only of upper-case name words, e.g. `JOAO PEREIRA LIMA`.
pub fn find_uppercase_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| line.chars().any(char::is_alphabetic))
        .filter(|line| line.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase))
        .find_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if !(2..=8).contains(&tokens.len()) {
                return None;
            }
            let candidate = collapse_spaces(line);
            is_plausible_name(&candidate).then_some(candidate)
        })
}

/// First line shaped like a capitalized full name, e.g. `Ana Paula de Souza`.
///
/// Only the part after the last `:` is considered, so `Titular: Ana Souza`
/// yields `Ana Souza`.
pub fn find_full_name(text: &str) -> Option<String> {
    text.lines()
        .map(|line| line.rsplit(':').next().unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .find_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if !(2..=6).contains(&tokens.len()) {
                return None;
            }

            let shaped = tokens.iter().all(|token| {
                let folded = fold_token(token);
                if is_particle(&folded) {
                    return true;
                }
                token.chars().next().is_some_and(char::is_uppercase)
            });
            if !shaped {
                return None;
            }

            let candidate = collapse_spaces(line);
            is_plausible_name(&candidate).then_some(candidate)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;

    lazy_static! {
        static ref MOTHER: Regex = Regex::new(r"(?i)\bM[AÃ]E\b").unwrap();
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("MARIA DA SILVA SANTOS RG "), "MARIA DA SILVA SANTOS");
        assert_eq!(clean_name("  DA SILVA   SANTOS DE "), "SILVA SANTOS");
        assert_eq!(clean_name("RG 123"), "");
    }

    #[test]
    fn test_is_plausible_name() {
        assert!(is_plausible_name("MARIA DA SILVA SANTOS"));
        assert!(is_plausible_name("José D'Ávila"));
        assert!(!is_plausible_name("MARIA"));
        assert!(!is_plausible_name("DA DE"));
        assert!(!is_plausible_name("JOAO 2 SILVA"));
        assert!(!is_plausible_name("REPUBLICA FEDERATIVA DO BRASIL"));
        assert!(!is_plausible_name("DATA NASCIMENTO"));
    }

    #[test]
    fn test_find_labeled_name_skips_parents() {
        let text = "NOME DO PAI: JOSE SANTOS\nNOME: MARIA DA SILVA SANTOS\nRG: 12.345.678-9";
        assert_eq!(find_labeled_name(text), Some("MARIA DA SILVA SANTOS".to_string()));
    }

    #[test]
    fn test_find_labeled_name_normalized() {
        let text = "REPUBLICA FEDERATIVA DO BRASIL NOME MARIA DA SILVA SANTOS RG 12 345 678 9";
        assert_eq!(find_labeled_name(text), Some("MARIA DA SILVA SANTOS".to_string()));
    }

    #[test]
    fn test_find_name_after_next_line() {
        let text = "FILIAÇÃO\nPAI: JOSE DOS SANTOS\nMÃE:\nANA MARIA SANTOS\n";
        assert_eq!(find_name_after(text, &MOTHER), Some("ANA MARIA SANTOS".to_string()));
    }

    #[test]
    fn test_find_names_after_filiation() {
        let filiation = Regex::new(r"(?i)FILIA[CÇ][AÃ]O").unwrap();
        let text = "FILIAÇÃO\nJOSE DOS SANTOS\nANA MARIA SANTOS\nNATURALIDADE SAO PAULO";
        assert_eq!(
            find_names_after(text, &filiation, 2),
            vec!["JOSE DOS SANTOS".to_string(), "ANA MARIA SANTOS".to_string()]
        );
        assert!(find_names_after("no anchor", &filiation, 2).is_empty());
    }

    #[test]
    fn test_find_uppercase_name() {
        let text = "REPUBLICA FEDERATIVA DO BRASIL\nCARTEIRA NACIONAL DE HABILITACAO\nJOAO PEREIRA LIMA\n123";
        assert_eq!(find_uppercase_name(text), Some("JOAO PEREIRA LIMA".to_string()));
    }

    #[test]
    fn test_find_full_name() {
        let text = "Conta de energia\nTitular: Ana Paula de Souza\nRua das Flores 10";
        assert_eq!(find_full_name(text), Some("Ana Paula de Souza".to_string()));
        assert_eq!(find_full_name("nothing here\n12345"), None);
    }
}
