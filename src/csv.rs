//! Tab-separated export of quality summaries.
//!
//! Digitization pipelines stage most of their intermediate data as TSV, so
//! summaries export that way by default. One row per report, with raw
//! counters first and derived ratios last.

use crate::summary::QaSummary;

/// Column header row, without a trailing newline.
pub const TSV_HEADER: &str = "file\tpages\twords\tchars\tsuspicious_chars\tdictionary_words\t\
                              penalized_words\tpenalty_total\tconfidence_total\tpct_in_dict\t\
                              penalty_pct\tavg_word_chars\tavg_word_penalty\tavg_char_confidence";

/// Render one summary as a TSV row, without a trailing newline.
///
/// Ratios are rendered with two decimal places, matching the text summary
/// line.
#[must_use]
pub fn summary_to_tsv_row(file: &str, summary: &QaSummary) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
        escape_tsv_value(file),
        summary.pages,
        summary.words,
        summary.chars,
        summary.suspicious_chars,
        summary.dictionary_words,
        summary.penalized_words,
        summary.penalty_total,
        summary.confidence_total,
        summary.pct_in_dict,
        summary.penalty_pct,
        summary.avg_word_chars,
        summary.avg_word_penalty,
        summary.avg_char_confidence
    )
}

/// Render labeled summaries as a TSV document with a header row.
///
/// # Examples
///
/// ```
/// use abbyyqa::csv::summaries_to_tsv;
/// use abbyyqa::QaAccumulator;
///
/// let summary = QaAccumulator::new().finish();
/// let tsv = summaries_to_tsv(&[("empty_abbyy.gz", &summary)]);
/// assert!(tsv.starts_with("file\tpages"));
/// assert_eq!(tsv.lines().count(), 2);
/// ```
#[must_use]
pub fn summaries_to_tsv(rows: &[(&str, &QaSummary)]) -> String {
    let mut out = String::with_capacity(128 * (rows.len() + 1));
    out.push_str(TSV_HEADER);
    out.push('\n');
    for (file, summary) in rows {
        out.push_str(&summary_to_tsv_row(file, summary));
        out.push('\n');
    }
    out
}

/// Quote a value when it contains a tab, quote, or line break.
fn escape_tsv_value(value: &str) -> String {
    if value.contains('\t') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
