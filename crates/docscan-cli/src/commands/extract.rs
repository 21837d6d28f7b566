//! Extract command - extract fields from a recognized text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use docscan_core::{extract_text, registry, TextExtraction};

use super::output::{format_csv, format_text, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file produced by OCR ("-" reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (see `docscan types`)
    #[arg(short = 't', long = "type")]
    document_type: String,

    /// Only extract these fields (comma separated)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Exit with an error when confidence is below this
    #[arg(long)]
    min_confidence: Option<u8>,
}

pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    ensure_supported(&args.document_type)?;

    let text = read_input(&args.input)?;
    info!("Extracting {} fields from {}", args.document_type, args.input.display());

    let extraction = extract_text(&args.document_type, &text, &args.fields);
    debug!(
        "Found {} fields with confidence {}",
        extraction.field_count(),
        extraction.confidence
    );

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if let Some(min) = args.min_confidence {
        if extraction.confidence < min {
            anyhow::bail!(
                "Confidence {} is below the required {}",
                extraction.confidence,
                min
            );
        }
    }

    Ok(())
}

/// Fail early on a type no extractor exists for.
pub fn ensure_supported(document_type: &str) -> anyhow::Result<()> {
    if !registry().supports(document_type) {
        anyhow::bail!(
            "Unsupported document type: {}. Supported types: {}",
            document_type,
            registry().supported_types().join(", ")
        );
    }
    Ok(())
}

fn read_input(input: &PathBuf) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    Ok(fs::read_to_string(input)?)
}

pub fn format_extraction(extraction: &TextExtraction, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
        OutputFormat::Csv => format_csv(&extraction.fields, extraction.confidence),
        OutputFormat::Text => Ok(format_text(
            &extraction.document_type,
            &extraction.fields,
            extraction.confidence,
        )),
    }
}
