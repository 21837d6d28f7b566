//! Output formats shared by the extraction commands.

use docscan_core::OcrExtractionResult;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// One header row of field names and one row of values, confidence last.
pub fn format_csv(fields: &OcrExtractionResult, confidence: u8) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = fields.keys().map(String::as_str).collect();
    header.push("confidence");
    wtr.write_record(&header)?;

    let confidence = confidence.to_string();
    let mut row: Vec<&str> = fields.values().map(String::as_str).collect();
    row.push(&confidence);
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(document_type: &str, fields: &OcrExtractionResult, confidence: u8) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", document_type));
    output.push_str(&format!("Confidence: {}%\n", confidence));
    output.push('\n');

    if fields.is_empty() {
        output.push_str("No fields extracted\n");
        return output;
    }

    let width = fields.keys().map(String::len).max().unwrap_or(0);
    for (name, value) in fields {
        output.push_str(&format!("  {:width$}  {}\n", name, value, width = width));
    }

    output
}
