use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CPF_CARD: &str = "RECEITA FEDERAL DO BRASIL\nNOME: MARIA DA SILVA SANTOS\nCPF: 123.456.789-09\n";

fn docscan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docscan").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("OCR_SPACE_API_KEY");
    cmd
}

#[test]
fn types_lists_every_document() {
    let home = TempDir::new().unwrap();
    docscan(&home)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("rg"))
        .stdout(predicate::str::contains("comprovante_endereco"))
        .stdout(predicate::str::contains("numero_registro"));
}

#[test]
fn types_as_json() {
    let home = TempDir::new().unwrap();
    let output = docscan(&home).args(["types", "--json"]).output().unwrap();
    assert!(output.status.success());

    let types: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let types = types.as_array().unwrap();
    assert_eq!(types.len(), 8);
    assert_eq!(types[0]["tag"], "rg");
}

#[test]
fn extract_prints_json() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("cpf.txt");
    fs::write(&input, CPF_CARD).unwrap();

    docscan(&home)
        .args(["extract", "-t", "cpf"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""cpf": "12345678909""#))
        .stdout(predicate::str::contains(r#""nome": "MARIA DA SILVA SANTOS""#));
}

#[test]
fn extract_from_stdin_as_csv() {
    let home = TempDir::new().unwrap();
    docscan(&home)
        .args(["extract", "-t", "cpf", "--fields", "cpf", "--format", "csv", "-"])
        .write_stdin(CPF_CARD)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cpf,confidence\n12345678909,"));
}

#[test]
fn extract_rejects_unknown_type() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("doc.txt");
    fs::write(&input, CPF_CARD).unwrap();

    docscan(&home)
        .args(["extract", "-t", "passaporte"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported document type: passaporte"));
}

#[test]
fn extract_enforces_min_confidence() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("noise.txt");
    fs::write(&input, "~~ ## ::").unwrap();

    docscan(&home)
        .args(["extract", "-t", "rg", "--min-confidence", "50"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("below the required 50"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let docs = home.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("a.txt"), CPF_CARD).unwrap();
    fs::write(docs.join("b.txt"), CPF_CARD).unwrap();
    let out = home.path().join("out");

    docscan(&home)
        .args(["batch", "-t", "cpf", "--summary", "-o"])
        .arg(&out)
        .arg(format!("{}/*.txt", docs.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,document_type,fields,confidence"));
    assert!(summary.contains("a.txt,success,cpf,2,"));
}

#[test]
fn batch_without_matches_fails() {
    let home = TempDir::new().unwrap();
    docscan(&home)
        .args(["batch", "-t", "rg"])
        .arg(format!("{}/*.txt", home.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn process_without_credentials_fails_before_ocr() {
    let home = TempDir::new().unwrap();
    docscan(&home)
        .args(["process", "-t", "rg", "https://files.invalid/rg.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing OCR service credentials"));
}

#[test]
fn config_init_get_and_set() {
    let home = TempDir::new().unwrap();

    docscan(&home)
        .args(["config", "get", "orientation.success_at"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50"));

    docscan(&home)
        .args(["config", "set", "orientation.success_at", "60"])
        .assert()
        .success();

    docscan(&home)
        .args(["config", "get", "orientation.success_at"])
        .assert()
        .success()
        .stdout(predicate::str::contains("60"));

    docscan(&home)
        .args(["config", "set", "orientation.success_at", "250"])
        .assert()
        .failure();

    let custom = home.path().join("custom.json");
    docscan(&home)
        .args(["config", "init", "-o"])
        .arg(&custom)
        .assert()
        .success();
    assert!(custom.exists());

    docscan(&home)
        .args(["config", "init", "-o"])
        .arg(&custom)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
