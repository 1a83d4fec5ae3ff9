//! Process command - classify a single fragment file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::info;

use idscan_core::{load_fragments, ClassificationResult, DocumentPipeline};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Fragment file: a JSON array of strings or text with one fragment per line
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = DocumentPipeline::new(config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let fragments = load_fragments(&args.input)?;
    let result = pipeline.try_process(&reference_for(&args.input), &fragments)?;

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} {} ({}) written to {} in {:?}",
            style("✓").green(),
            result.document_type(),
            result.side(),
            output_path.display(),
            start.elapsed()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Reference id for a fragment file: its file name.
pub fn reference_for(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

pub fn format_result(result: &ClassificationResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(format_result_text(result)),
    }
}

fn format_result_text(result: &ClassificationResult) -> String {
    let summary = result.summary();
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", result.filename()));
    output.push_str(&format!("Document: {}\n", result.document_type()));
    output.push_str(&format!("Side: {}\n", result.side()));
    output.push('\n');

    output.push_str("Fields:\n");
    let fields = [
        ("Name", summary.name.as_deref()),
        ("Father's Name", summary.fathers_name.as_deref()),
        ("DOB", summary.dob.as_deref()),
        ("Number", summary.number.as_deref()),
        ("Issuing Authority", summary.issuing_authority.map(|a| a.label())),
    ];
    for (label, value) in fields {
        output.push_str(&format!("  {:<18} {}\n", format!("{label}:"), value.unwrap_or("-")));
    }

    if !result.scores().is_empty() {
        output.push('\n');
        output.push_str("Scores:\n");
        for (doc_type, score) in result.scores().iter() {
            output.push_str(&format!("  {:<18} {:.1}\n", doc_type.label(), score));
        }
    }

    if !summary.other_details.is_empty() {
        output.push('\n');
        output.push_str("Other details:\n");
        for detail in &summary.other_details {
            output.push_str(&format!("  {}\n", detail));
        }
    }

    output
}
