//! JSON export of quality summaries.

use crate::summary::QaSummary;
use serde_json::{json, Value};

/// Render one labeled summary as a JSON object.
#[must_use]
pub fn summary_to_json(file: &str, summary: &QaSummary) -> Value {
    json!({
        "file": file,
        "pages": summary.pages,
        "words": summary.words,
        "chars": summary.chars,
        "suspicious_chars": summary.suspicious_chars,
        "dictionary_words": summary.dictionary_words,
        "penalized_words": summary.penalized_words,
        "penalty_total": summary.penalty_total,
        "confidence_total": summary.confidence_total,
        "pct_in_dict": summary.pct_in_dict,
        "penalty_pct": summary.penalty_pct,
        "avg_word_chars": summary.avg_word_chars,
        "avg_word_penalty": summary.avg_word_penalty,
        "avg_char_confidence": summary.avg_char_confidence,
    })
}

/// Render labeled summaries as a JSON array, preserving input order.
#[must_use]
pub fn summaries_to_json(rows: &[(&str, &QaSummary)]) -> Value {
    Value::Array(
        rows.iter()
            .map(|(file, summary)| summary_to_json(file, summary))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::QaAccumulator;

    #[test]
    fn test_object_carries_label_and_counters() {
        let mut qa = QaAccumulator::new();
        qa.begin_page();
        let summary = qa.finish();

        let value = summary_to_json("book_abbyy.gz", &summary);
        assert_eq!(value["file"], "book_abbyy.gz");
        assert_eq!(value["pages"], 1);
        assert_eq!(value["words"], 0);
        assert_eq!(value["pct_in_dict"], 0.0);
    }

    #[test]
    fn test_array_preserves_order() {
        let summary = QaAccumulator::new().finish();
        let value = summaries_to_json(&[("b.gz", &summary), ("a.gz", &summary)]);
        assert_eq!(value[0]["file"], "b.gz");
        assert_eq!(value[1]["file"], "a.gz");
    }
}
