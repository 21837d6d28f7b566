//! Process command - run a document image through OCR and extraction.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use docscan_core::{DocumentProcessor, ExtractionRequest, ExtractionResponse};

use super::config::load_config;
use super::extract::ensure_supported;
use super::output::{format_csv, format_text, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Publicly reachable URL of the document image
    #[arg(required = true)]
    url: String,

    /// Document type (see `docscan types`)
    #[arg(short = 't', long = "type")]
    document_type: String,

    /// Only extract these fields (comma separated)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// OCR service API key (overrides the config file)
    #[arg(long, env = "OCR_SPACE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    ensure_supported(&args.document_type)?;

    let mut config = load_config(config_path)?;
    if let Some(key) = &args.api_key {
        config.ocr.api_key = Some(key.clone());
    }

    let processor = DocumentProcessor::from_config(&config)?;
    let request = ExtractionRequest::new(&args.url, &args.document_type)
        .with_expected_fields(args.fields.iter().cloned());

    info!("Processing {} as {}", args.url, args.document_type);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Recognizing document...");

    let response = processor.process(&request).await;

    pb.finish_and_clear();

    let output = format_response(&args.document_type, &response, args.format)?;

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

    if response.success {
        eprintln!("{} {}", style("✓").green(), response.message);
    } else {
        eprintln!("{} {}", style("✗").red(), response.message);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_response(
    document_type: &str,
    response: &ExtractionResponse,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => format_csv(&response.data, response.confidence),
        OutputFormat::Text => {
            let mut output = format_text(document_type, &response.data, response.confidence);
            if let Some(tested) = &response.tested_orientations {
                let tested: Vec<String> = tested.iter().map(|d| format!("{}°", d)).collect();
                output.push_str(&format!("\nOrientations tried: {}\n", tested.join(", ")));
            }
            Ok(output)
        }
    }
}
