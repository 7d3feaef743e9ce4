//! Property tests comparing the accumulator against a direct model of the
//! counting rules.

mod common;

use abbyyqa::{AbbyyReader, ConfidencePolicy, QaAccumulator, QaSummary, WordCheck};
use common::{char_node, page_fragment, report_document};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct SyntheticChar {
    text: char,
    confidence: Option<i64>,
    word_start: bool,
    from_dictionary: bool,
    penalty: i64,
    suspicious: bool,
}

impl SyntheticChar {
    fn counted(&self) -> bool {
        self.text != ' '
    }

    fn opens_word(&self) -> bool {
        self.counted() && self.word_start
    }
}

fn synthetic_char() -> impl Strategy<Value = SyntheticChar> {
    (
        prop_oneof![Just(' '), prop::char::range('a', 'z')],
        prop::option::of(0i64..=255),
        any::<bool>(),
        any::<bool>(),
        0i64..=40,
        any::<bool>(),
    )
        .prop_map(
            |(text, confidence, word_start, from_dictionary, penalty, suspicious)| SyntheticChar {
                text,
                confidence,
                word_start,
                from_dictionary,
                penalty,
                suspicious,
            },
        )
}

fn render(chars: &[SyntheticChar]) -> String {
    let lines: Vec<String> = chars
        .iter()
        .map(|c| {
            let text = c.text.to_string();
            let confidence = c.confidence.map(|v| v.to_string());
            let penalty = c.penalty.to_string();
            let mut attrs: Vec<(&str, &str)> = Vec::new();
            if let Some(value) = confidence.as_deref() {
                attrs.push(("charConfidence", value));
            }
            if c.word_start {
                attrs.push(("wordStart", "true"));
            }
            attrs.push((
                "wordFromDictionary",
                if c.from_dictionary { "true" } else { "false" },
            ));
            attrs.push(("wordPenalty", penalty.as_str()));
            if c.suspicious {
                attrs.push(("suspicious", "true"));
            }
            char_node(&text, &attrs)
        })
        .collect();
    report_document(&[page_fragment(&lines)])
}

fn analyze(report: &str, check: WordCheck) -> QaSummary {
    let mut reader = AbbyyReader::new(report.as_bytes());
    let mut qa = QaAccumulator::new()
        .with_confidence_policy(ConfidencePolicy::CountAll)
        .with_word_check(check);
    while let Some(page) = reader.read_page().unwrap() {
        qa.observe_page(&page);
    }
    qa.finish()
}

proptest! {
    #[test]
    fn counters_match_a_direct_model(chars in prop::collection::vec(synthetic_char(), 0..120)) {
        let summary = analyze(&render(&chars), WordCheck::Off);

        let counted = chars.iter().filter(|c| c.counted()).count() as u64;
        let words = chars.iter().filter(|c| c.opens_word()).count() as u64;
        let dictionary = chars
            .iter()
            .filter(|c| c.opens_word() && c.from_dictionary)
            .count() as u64;
        let penalized = chars
            .iter()
            .filter(|c| c.opens_word() && c.penalty != 0)
            .count() as u64;
        let penalty_total: i64 = chars
            .iter()
            .filter(|c| c.opens_word())
            .map(|c| c.penalty)
            .sum();
        let confidence_total: i64 = chars
            .iter()
            .filter(|c| c.counted())
            .map(|c| c.confidence.unwrap_or(255))
            .sum();
        let suspicious = chars
            .iter()
            .filter(|c| c.counted() && c.suspicious)
            .count() as u64;

        prop_assert_eq!(summary.pages, 1);
        prop_assert_eq!(summary.chars, counted);
        prop_assert_eq!(summary.words, words);
        prop_assert_eq!(summary.dictionary_words, dictionary);
        prop_assert_eq!(summary.penalized_words, penalized);
        prop_assert_eq!(summary.penalty_total, penalty_total);
        prop_assert_eq!(summary.confidence_total, confidence_total);
        prop_assert_eq!(summary.suspicious_chars, suspicious);

        let expected_avg_penalty = if words == 0 {
            0.0
        } else {
            penalty_total as f64 / words as f64
        };
        prop_assert!((summary.avg_word_penalty - expected_avg_penalty).abs() < 1e-9);
    }

    #[test]
    fn ratios_stay_in_range_and_guard_zero(chars in prop::collection::vec(synthetic_char(), 0..120)) {
        let summary = analyze(&render(&chars), WordCheck::Off);

        prop_assert!(summary.words <= summary.chars);
        prop_assert!(summary.dictionary_words <= summary.words);
        prop_assert!(summary.penalized_words <= summary.words);
        prop_assert!(summary.suspicious_chars <= summary.chars);

        prop_assert!((0.0..=100.0).contains(&summary.pct_in_dict));
        prop_assert!((0.0..=100.0).contains(&summary.penalty_pct));
        prop_assert!((0.0..=40.0).contains(&summary.avg_word_penalty));
        prop_assert!((0.0..=255.0).contains(&summary.avg_char_confidence));
        if summary.words == 0 {
            prop_assert_eq!(summary.pct_in_dict, 0.0);
            prop_assert_eq!(summary.penalty_pct, 0.0);
            prop_assert_eq!(summary.avg_word_chars, 0.0);
            prop_assert_eq!(summary.avg_word_penalty, 0.0);
        }
        if summary.chars == 0 {
            prop_assert_eq!(summary.avg_char_confidence, 0.0);
        }
    }

    #[test]
    fn analysis_is_deterministic(chars in prop::collection::vec(synthetic_char(), 0..60)) {
        let report = render(&chars);
        prop_assert_eq!(analyze(&report, WordCheck::Off), analyze(&report, WordCheck::Off));
    }

    #[test]
    fn word_checking_never_changes_the_counts(chars in prop::collection::vec(synthetic_char(), 0..60)) {
        let report = render(&chars);
        prop_assert_eq!(analyze(&report, WordCheck::Warn), analyze(&report, WordCheck::Off));
    }
}
