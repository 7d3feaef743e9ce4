//! Best-effort processing of report files and directories.
//!
//! A batch run analyzes each report independently: a file that fails to open,
//! decompress, or parse is recorded as failed and the run moves on. Outcomes
//! keep their input order, so repeated runs over the same inputs produce the
//! same report.

use crate::accumulator::{ConfidencePolicy, QaAccumulator, WordCheck};
use crate::error::Result;
use crate::reader::AbbyyReader;
use crate::summary::QaSummary;
use flate2::read::GzDecoder;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Filename suffix that identifies OCR reports during directory discovery.
pub const REPORT_SUFFIX: &str = "_abbyy.gz";

/// Options applied to every report in a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// How reserved-confidence characters are counted
    pub confidence_policy: ConfidencePolicy,
    /// Whether repeated word attributes are checked for agreement
    pub word_check: WordCheck,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// Per-file outcome, keyed by path in first-appearance order
    pub outcomes: IndexMap<PathBuf, Result<QaSummary>>,
    /// Wall-clock time for the whole run
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of reports analyzed successfully.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_ok()).count()
    }

    /// Number of reports that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    /// Successful summaries with their paths, in input order.
    pub fn summaries(&self) -> impl Iterator<Item = (&Path, &QaSummary)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(path, outcome)| outcome.as_ref().ok().map(|s| (path.as_path(), s)))
    }
}

/// Analyze a single report file.
///
/// Files ending in `.gz` are decompressed on the fly; anything else is read
/// as-is. The summary covers the whole file, so any failure discards the
/// partial tallies and fails the file.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or read, ends inside a
/// page, or contains a page that fails to parse.
pub fn process_file(path: &Path, options: &ProcessOptions) -> Result<QaSummary> {
    let mut reader = AbbyyReader::new(BufReader::new(open_report(path)?));
    let mut qa = QaAccumulator::new()
        .with_confidence_policy(options.confidence_policy)
        .with_word_check(options.word_check);
    while let Some(page) = reader.read_page()? {
        qa.observe_page(&page);
    }
    Ok(qa.finish())
}

fn open_report(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// Find report files directly under `dir` whose names end in `suffix`.
///
/// Results are sorted by path, so discovery order does not depend on the
/// directory listing order.
///
/// # Errors
///
/// Returns an error when the directory cannot be listed.
pub fn discover_reports(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && path.is_file() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Analyze reports one after another.
///
/// Outcomes are keyed by path, so a path listed more than once is analyzed
/// only once. Failures are recorded per file and never abort the run.
#[must_use]
pub fn process_batch(paths: &[PathBuf], options: &ProcessOptions) -> BatchReport {
    let started = Instant::now();
    let outcomes = unique_paths(paths)
        .into_iter()
        .map(|path| {
            let outcome = run_report(&path, options);
            (path, outcome)
        })
        .collect();
    BatchReport {
        outcomes,
        elapsed: started.elapsed(),
    }
}

/// Analyze reports across the rayon thread pool.
///
/// Reports are independent, so this parallelizes across files while keeping
/// the outcome order identical to [`process_batch`].
#[must_use]
pub fn process_batch_parallel(paths: &[PathBuf], options: &ProcessOptions) -> BatchReport {
    let started = Instant::now();
    let outcomes: Vec<(PathBuf, Result<QaSummary>)> = unique_paths(paths)
        .into_par_iter()
        .map(|path| {
            let outcome = run_report(&path, options);
            (path, outcome)
        })
        .collect();
    BatchReport {
        outcomes: outcomes.into_iter().collect(),
        elapsed: started.elapsed(),
    }
}

/// Drop repeated paths, keeping first-appearance order.
fn unique_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::with_capacity(paths.len());
    paths
        .iter()
        .filter(|path| seen.insert(*path))
        .cloned()
        .collect()
}

fn run_report(path: &Path, options: &ProcessOptions) -> Result<QaSummary> {
    tracing::info!("processing {}", path.display());
    let outcome = process_file(path, options);
    if let Err(error) = &outcome {
        tracing::warn!("{}: {error}", path.display());
    }
    outcome
}
