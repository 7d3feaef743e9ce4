//! Character and word statistics over a stream of pages.
//!
//! [`QaAccumulator`] consumes [`CharParams`] records in document order and
//! maintains the running counters behind a per-file quality summary. Feed it
//! one report, then call [`finish`](QaAccumulator::finish) to derive the
//! summary.
//!
//! # Example
//!
//! ```
//! use abbyyqa::{AbbyyReader, QaAccumulator};
//!
//! let report = "<page>\n\
//!     <charParams wordStart=\"true\" wordFromDictionary=\"true\" charConfidence=\"200\">a</charParams>\n\
//!     <charParams charConfidence=\"100\">b</charParams>\n\
//!     </page>\n";
//! let mut reader = AbbyyReader::new(report.as_bytes());
//! let mut qa = QaAccumulator::new();
//! while let Some(page) = reader.read_page()? {
//!     qa.observe_page(&page);
//! }
//!
//! let summary = qa.finish();
//! assert_eq!(summary.words, 1);
//! assert_eq!(summary.chars, 2);
//! assert_eq!(summary.confidence_total, 300);
//! # Ok::<(), abbyyqa::QaError>(())
//! ```

use crate::page::{CharParams, Page, WordAttributes, RESERVED_CONFIDENCE};
use crate::summary::QaSummary;

/// How characters carrying the reserved confidence value are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfidencePolicy {
    /// Count every character, including those reported at the reserved value.
    /// This matches the recognizer's own convention of treating the value as
    /// a (very low) confidence.
    #[default]
    CountAll,
    /// Skip characters reported at the reserved value entirely, as if they
    /// were not recognized at all. Their word attributes are ignored too.
    SkipReserved,
}

/// Whether word attributes repeated across a word are checked for agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordCheck {
    /// No checking.
    #[default]
    Off,
    /// Compare each continuation character against the word's first character
    /// and record a warning per differing attribute.
    Warn,
}

/// Streaming accumulator for recognition quality counters.
///
/// Word statistics are taken from the first character of each word: a
/// character with `wordStart="true"` opens a word and contributes its
/// dictionary and penalty attributes, while continuation characters only
/// add to the character counters. Space characters separate words and are
/// excluded from every counter. A word never spans pages, so the current
/// word is forgotten whenever a new page begins.
#[derive(Debug, Default)]
pub struct QaAccumulator {
    confidence_policy: ConfidencePolicy,
    word_check: WordCheck,
    pages: u64,
    words: u64,
    chars: u64,
    suspicious_chars: u64,
    dictionary_words: u64,
    penalized_words: u64,
    penalty_total: i64,
    confidence_total: i64,
    /// Attributes latched from the current word's first character
    current_word: Option<WordAttributes>,
    warnings: Vec<String>,
}

impl QaAccumulator {
    /// Create an accumulator with default policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how reserved-confidence characters are counted.
    #[must_use]
    pub fn with_confidence_policy(mut self, policy: ConfidencePolicy) -> Self {
        self.confidence_policy = policy;
        self
    }

    /// Set whether repeated word attributes are checked for agreement.
    #[must_use]
    pub fn with_word_check(mut self, check: WordCheck) -> Self {
        self.word_check = check;
        self
    }

    /// Start a new page. Increments the page counter and forgets the current
    /// word.
    pub fn begin_page(&mut self) {
        self.pages += 1;
        self.current_word = None;
    }

    /// Fold one character into the counters.
    ///
    /// Space characters are skipped outright, before any counter or word
    /// handling.
    pub fn observe(&mut self, params: &CharParams) {
        if params.text == " " {
            return;
        }
        if self.confidence_policy == ConfidencePolicy::SkipReserved
            && params.confidence == RESERVED_CONFIDENCE
        {
            return;
        }

        self.chars += 1;
        self.confidence_total += params.confidence;
        if params.suspicious {
            self.suspicious_chars += 1;
        }

        if params.word_start {
            self.words += 1;
            if params.word.is_from_dictionary() {
                self.dictionary_words += 1;
            }
            if let Some(penalty) = params.penalty {
                self.penalty_total += penalty;
                self.penalized_words += 1;
            }
            self.current_word = Some(params.word.clone());
        } else if self.word_check == WordCheck::Warn {
            self.check_word_agreement(params);
        }
    }

    /// Observe every character of a page, starting a new page first.
    pub fn observe_page(&mut self, page: &Page) {
        self.begin_page();
        for params in &page.chars {
            self.observe(params);
        }
    }

    /// Compare a continuation character's word attributes against the values
    /// latched at the word start. Characters before the first word of a page
    /// have nothing to compare against and are left alone.
    fn check_word_agreement(&mut self, params: &CharParams) {
        let Some(latched) = self.current_word.clone() else {
            return;
        };
        if params.word.from_dictionary != latched.from_dictionary {
            self.note_disagreement(
                "wordFromDictionary",
                params.word.from_dictionary.as_deref(),
                latched.from_dictionary.as_deref(),
            );
        }
        if params.word.penalty != latched.penalty {
            self.note_disagreement(
                "wordPenalty",
                params.word.penalty.as_deref(),
                latched.penalty.as_deref(),
            );
        }
        if params.word.normal != latched.normal {
            self.note_disagreement(
                "wordNormal",
                params.word.normal.as_deref(),
                latched.normal.as_deref(),
            );
        }
    }

    fn note_disagreement(&mut self, attribute: &str, seen: Option<&str>, latched: Option<&str>) {
        let message = format!(
            "page {}: {attribute} differs from word start ({seen:?} vs {latched:?})",
            self.pages
        );
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    /// Warnings recorded so far, in detection order.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Derive the summary for everything observed so far.
    ///
    /// Every ratio is 0 when its denominator is 0, so the summary is safe to
    /// take from an empty or image-only report.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(&self) -> QaSummary {
        let ratio = |numerator: f64, denominator: f64| {
            if denominator == 0.0 {
                0.0
            } else {
                numerator / denominator
            }
        };
        let words = self.words as f64;
        let chars = self.chars as f64;
        QaSummary {
            pages: self.pages,
            words: self.words,
            chars: self.chars,
            suspicious_chars: self.suspicious_chars,
            dictionary_words: self.dictionary_words,
            penalized_words: self.penalized_words,
            penalty_total: self.penalty_total,
            confidence_total: self.confidence_total,
            pct_in_dict: 100.0 * ratio(self.dictionary_words as f64, words),
            penalty_pct: 100.0 * ratio(self.penalized_words as f64, words),
            avg_word_chars: ratio(chars, words),
            avg_word_penalty: ratio(self.penalty_total as f64, words),
            avg_char_confidence: ratio(self.confidence_total as f64, chars),
        }
    }
}
