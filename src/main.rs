//! Command-line driver for batch OCR quality analysis.
//!
//! Analyzes a single report or every matching report under a directory,
//! printing one summary per report on stdout and diagnostics on stderr. A
//! report that fails to decode is logged and skipped; the run carries on and
//! still exits successfully.

use abbyyqa::{
    csv, discover_reports, json, process_batch, process_batch_parallel, ConfidencePolicy,
    ProcessOptions, QaSummary, WordCheck, REPORT_SUFFIX,
};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "abbyyqa",
    version,
    about = "Recognition quality summaries for ABBYY OCR reports"
)]
struct CommandLine {
    /// Report file, or a directory to scan for reports
    path: PathBuf,

    /// Filename suffix used when scanning a directory
    #[arg(long, default_value = REPORT_SUFFIX)]
    suffix: String,

    /// Skip characters reported at the reserved confidence value
    #[arg(long)]
    skip_reserved: bool,

    /// Warn when word attributes disagree within a word
    #[arg(long)]
    check_words: bool,

    /// Analyze files across a thread pool
    #[arg(long)]
    parallel: bool,

    /// Output format for per-file summaries
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One human-readable line per report
    Text,
    /// Tab-separated values with a header row
    Tsv,
    /// JSON array of per-report objects
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abbyyqa=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CommandLine::parse();

    let files = if args.path.is_dir() {
        let found = discover_reports(&args.path, &args.suffix)
            .with_context(|| format!("scanning {}", args.path.display()))?;
        tracing::info!(
            "found {} report files in {}",
            found.len(),
            args.path.display()
        );
        found
    } else {
        vec![args.path.clone()]
    };

    let options = ProcessOptions {
        confidence_policy: if args.skip_reserved {
            ConfidencePolicy::SkipReserved
        } else {
            ConfidencePolicy::CountAll
        },
        word_check: if args.check_words {
            WordCheck::Warn
        } else {
            WordCheck::Off
        },
    };

    let report = if args.parallel {
        process_batch_parallel(&files, &options)
    } else {
        process_batch(&files, &options)
    };

    let rows: Vec<(String, &QaSummary)> = report
        .summaries()
        .map(|(path, summary)| (path.display().to_string(), summary))
        .collect();

    match args.format {
        OutputFormat::Text => {
            for (file, summary) in &rows {
                println!("{file}: {summary}");
            }
            println!(
                "Processed {} files in {:.2?}",
                report.outcomes.len(),
                report.elapsed
            );
        }
        OutputFormat::Tsv => {
            let refs: Vec<(&str, &QaSummary)> = rows
                .iter()
                .map(|(file, summary)| (file.as_str(), *summary))
                .collect();
            print!("{}", csv::summaries_to_tsv(&refs));
        }
        OutputFormat::Json => {
            let refs: Vec<(&str, &QaSummary)> = rows
                .iter()
                .map(|(file, summary)| (file.as_str(), *summary))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json::summaries_to_json(&refs))?
            );
        }
    }

    if args.format != OutputFormat::Text {
        tracing::info!(
            "processed {} files in {:.2?}",
            report.outcomes.len(),
            report.elapsed
        );
    }
    if report.failed() > 0 {
        tracing::warn!("{} of {} files failed", report.failed(), report.outcomes.len());
    }

    Ok(())
}
