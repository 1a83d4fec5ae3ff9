//! Batch processing command for multiple fragment files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use idscan_core::{load_fragments, BatchSummary, ClassificationResult, DocumentPipeline};

use super::config::load_config;
use super::process::{format_result, reference_for, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: print one JSON report to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write results into predicted/ and not_predicted/ subdirectories
    #[arg(long, requires = "output_dir")]
    split: bool,

    /// Append a timestamp to output file names
    #[arg(long, requires = "output_dir")]
    timestamp: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,
}

/// Result of processing a single file.
struct FileResult {
    index: usize,
    path: PathBuf,
    result: idscan_core::Result<ClassificationResult>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = Arc::new(DocumentPipeline::new(config)?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "json" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Classification is pure CPU work; run it on the blocking pool.
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let file_start = Instant::now();

            let task_path = path.clone();
            let result =
                tokio::task::spawn_blocking(move || classify_file(&pipeline, &task_path)).await?;

            anyhow::Ok(FileResult {
                index,
                path,
                result,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            })
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let file_result = joined??;
        if let Err(e) = &file_result.result {
            warn!("Failed to process {}: {}", file_result.path.display(), e);
        }
        results.push(file_result);
        pb.inc(1);
    }
    pb.finish_and_clear();

    results.sort_by_key(|r| r.index);

    let mut counts = BatchSummary::default();
    for result in &results {
        counts.record(&result.result);
    }

    match &args.output_dir {
        Some(output_dir) => write_outputs(&results, output_dir, &args)?,
        None => print_report(&results, &counts, args.format)?,
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        counts.total_files,
        start.elapsed()
    );
    eprintln!(
        "   {} predicted, {} not predicted, {} failed",
        style(counts.predicted).green(),
        style(counts.not_predicted).yellow(),
        style(counts.failed).red()
    );

    let failed: Vec<_> = results.iter().filter(|r| r.result.is_err()).collect();
    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in failed {
            if let Err(e) = &result.result {
                eprintln!("  - {}: {}", result.path.display(), e);
            }
        }
    }

    Ok(())
}

fn classify_file(
    pipeline: &DocumentPipeline,
    path: &Path,
) -> idscan_core::Result<ClassificationResult> {
    let fragments = load_fragments(path)?;
    pipeline.try_process(&reference_for(path), &fragments)
}

fn write_outputs(results: &[FileResult], output_dir: &Path, args: &BatchArgs) -> anyhow::Result<()> {
    let suffix = if args.timestamp {
        chrono::Local::now().format("_%Y%m%d_%H%M%S").to_string()
    } else {
        String::new()
    };

    let mut written = HashSet::new();

    for file_result in results {
        let Ok(result) = &file_result.result else {
            continue;
        };

        let dir = if args.split {
            let sub = if result.is_predicted() {
                "predicted"
            } else {
                "not_predicted"
            };
            output_dir.join(sub)
        } else {
            output_dir.to_path_buf()
        };
        fs::create_dir_all(&dir)?;

        let stem = file_result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let extension = args.format.extension();
        let mut output_path = dir.join(format!("{}{}.{}", stem, suffix, extension));
        // Inputs with the same stem (a.json and a.txt, or one name in two
        // directories) get the input index appended.
        if !written.insert(output_path.clone()) {
            let renamed =
                dir.join(format!("{}{}_{}.{}", stem, suffix, file_result.index + 1, extension));
            warn!(
                "{} would overwrite {}, writing {} instead",
                file_result.path.display(),
                output_path.display(),
                renamed.display()
            );
            output_path = renamed;
            written.insert(output_path.clone());
        }

        fs::write(&output_path, format_result(result, args.format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

fn print_report(
    results: &[FileResult],
    counts: &BatchSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Text {
        for file_result in results {
            match &file_result.result {
                Ok(result) => println!("{}", format_result(result, format)?),
                Err(e) => println!("File: {}\nError: {}\n", reference_for(&file_result.path), e),
            }
        }
        return Ok(());
    }

    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|r| match &r.result {
            Ok(result) => serde_json::to_value(result),
            Err(e) => Ok(json!({
                "filename": reference_for(&r.path),
                "error": e.to_string(),
            })),
        })
        .collect::<Result<_, _>>()?;

    let report = json!({
        "summary": counts,
        "results": entries,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_type",
        "side",
        "best_score",
        "number",
        "processing_time_ms",
        "error",
    ])?;

    for file_result in results {
        let filename = reference_for(&file_result.path);

        match &file_result.result {
            Ok(result) => {
                let best_score = result
                    .scores()
                    .iter()
                    .map(|(_, score)| score)
                    .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))));
                let status = if result.is_predicted() {
                    "predicted"
                } else {
                    "not_predicted"
                };

                wtr.write_record([
                    filename.as_str(),
                    status,
                    result.document_type().label(),
                    &result.side().to_string(),
                    &best_score.map(|s| format!("{:.1}", s)).unwrap_or_default(),
                    result.summary().number.as_deref().unwrap_or(""),
                    &file_result.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            Err(e) => {
                wtr.write_record([
                    filename.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    &file_result.processing_time_ms.to_string(),
                    &e.to_string(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
