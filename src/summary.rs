//! Per-file quality summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated recognition quality for one OCR report.
///
/// Raw counters and derived ratios are both kept, so downstream consumers can
/// re-aggregate across files without reparsing. Derived ratios are 0 whenever
/// their denominator is 0.
///
/// The [`Display`](fmt::Display) rendering is the one-line form used by the
/// batch driver:
///
/// ```text
/// 52 pages, 16342 words, 93.17% in dict,  2.41% penalties,  4.87 char/word, 11.20 avg word penalty, 74.03 char conf
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaSummary {
    /// Page fragments seen
    pub pages: u64,
    /// Words counted, one per word-start character
    pub words: u64,
    /// Characters counted, excluding spaces
    pub chars: u64,
    /// Characters flagged suspicious by the recognizer
    pub suspicious_chars: u64,
    /// Words found in the recognition dictionary
    pub dictionary_words: u64,
    /// Words carrying a nonzero recognition penalty
    pub penalized_words: u64,
    /// Sum of nonzero word penalties
    pub penalty_total: i64,
    /// Sum of character confidences
    pub confidence_total: i64,
    /// Percentage of words found in the dictionary
    pub pct_in_dict: f64,
    /// Percentage of words carrying a penalty
    pub penalty_pct: f64,
    /// Mean characters per word
    pub avg_word_chars: f64,
    /// Mean penalty per word, spread over all counted words
    pub avg_word_penalty: f64,
    /// Mean confidence over counted characters
    pub avg_char_confidence: f64,
}

impl fmt::Display for QaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} words, {:5.2}% in dict, {:5.2}% penalties, {:5.2} char/word, {:5.2} avg word penalty, {:5.2} char conf",
            self.pages,
            self.words,
            self.pct_in_dict,
            self.penalty_pct,
            self.avg_word_chars,
            self.avg_word_penalty,
            self.avg_char_confidence
        )
    }
}
