//! Parsing of standalone page fragments into character records.
//!
//! A fragment produced by [`PageScanner`](crate::scanner::PageScanner) is a
//! complete XML document rooted at `<page>`. Recognition data lives in
//! `charParams` elements, one per recognized character, nested at varying
//! depths under block, paragraph, line, and formatting elements. The parser
//! walks the fragment as a flat event stream and collects every `charParams`
//! it encounters, wherever it sits in the hierarchy.

use crate::error::{QaError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Element name carrying per-character recognition data.
const CHAR_TAG: &[u8] = b"charParams";

/// Confidence value the recognizer reports for characters it could not
/// estimate. It is also the assumed value when the attribute is absent.
pub const RESERVED_CONFIDENCE: i64 = 255;

/// Word-level attributes as they appear on a `charParams` element.
///
/// The recognizer repeats these on every character of a word, so consecutive
/// characters of one word should carry identical values. Values are kept
/// verbatim, with `None` for an absent attribute, so that repeats can be
/// compared without interpreting them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordAttributes {
    /// Raw `wordFromDictionary` value, if present
    pub from_dictionary: Option<String>,
    /// Raw `wordPenalty` value, if present
    pub penalty: Option<String>,
    /// Raw `wordNormal` value, if present
    pub normal: Option<String>,
}

impl WordAttributes {
    /// Whether the word was matched against the recognition dictionary.
    #[must_use]
    pub fn is_from_dictionary(&self) -> bool {
        self.from_dictionary.as_deref() == Some("true")
    }

    /// Whether the recognizer classified the word as normally recognized.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.normal.as_deref() == Some("true")
    }

    /// Parse the recognition penalty. Absent, empty, and `0` values all mean
    /// the word carries no penalty.
    pub(crate) fn effective_penalty(&self) -> Result<Option<i64>> {
        match self.penalty.as_deref() {
            Some(raw) if !raw.is_empty() && raw != "0" => {
                let value = raw.parse().map_err(|_| {
                    QaError::InvalidAttribute(format!("wordPenalty `{raw}` is not an integer"))
                })?;
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }
}

/// One recognized character from a page fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharParams {
    /// Recognized text content, usually a single character
    pub text: String,
    /// Recognition confidence, [`RESERVED_CONFIDENCE`] when not reported
    pub confidence: i64,
    /// Whether the recognizer flagged the character as suspicious
    pub suspicious: bool,
    /// Whether this character starts a new word
    pub word_start: bool,
    /// Recognition penalty for the containing word, when present and nonzero
    pub penalty: Option<i64>,
    /// Word-level attributes carried on this character
    pub word: WordAttributes,
}

impl CharParams {
    /// Extract recognition attributes from a `charParams` start tag.
    ///
    /// `suspicious` is truthy when the attribute is present with any non-empty
    /// value, while `wordStart` requires the literal value `true`. Numeric
    /// attributes must parse as integers.
    fn from_start(element: &BytesStart<'_>) -> Result<Self> {
        let mut params = Self {
            text: String::new(),
            confidence: RESERVED_CONFIDENCE,
            suspicious: false,
            word_start: false,
            penalty: None,
            word: WordAttributes::default(),
        };
        for attr in element.attributes() {
            let attr = attr
                .map_err(|e| QaError::MalformedPage(format!("bad charParams attribute: {e}")))?;
            let value = attr.unescape_value().map_err(|e| {
                QaError::MalformedPage(format!("bad charParams attribute value: {e}"))
            })?;
            match attr.key.as_ref() {
                b"charConfidence" => {
                    params.confidence = value.parse().map_err(|_| {
                        QaError::InvalidAttribute(format!(
                            "charConfidence `{value}` is not an integer"
                        ))
                    })?;
                }
                b"suspicious" => params.suspicious = !value.is_empty(),
                b"wordStart" => params.word_start = value == "true",
                b"wordFromDictionary" => params.word.from_dictionary = Some(value.into_owned()),
                b"wordPenalty" => params.word.penalty = Some(value.into_owned()),
                b"wordNormal" => params.word.normal = Some(value.into_owned()),
                _ => {}
            }
        }
        params.penalty = params.word.effective_penalty()?;
        Ok(params)
    }
}

/// One parsed page fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    /// Position of the page in its report, 1-based, 0 when parsed standalone
    pub number: usize,
    /// Characters in document order
    pub chars: Vec<CharParams>,
}

/// Parse a standalone page fragment into its character records.
///
/// `charParams` elements are collected at any depth. Other elements are
/// ignored, as is text outside `charParams`.
///
/// # Examples
///
/// ```
/// use abbyyqa::page::parse_page;
///
/// let fragment = br#"<?xml version="1.0" encoding="UTF-8"?>
/// <page width="2480" height="3508">
/// <charParams charConfidence="80" wordStart="true">a</charParams>
/// </page>"#;
///
/// let page = parse_page(fragment)?;
/// assert_eq!(page.chars.len(), 1);
/// assert_eq!(page.chars[0].confidence, 80);
/// assert_eq!(page.chars[0].text, "a");
/// # Ok::<(), abbyyqa::QaError>(())
/// ```
///
/// # Errors
///
/// Returns [`QaError::MalformedPage`] when the fragment is not well-formed
/// XML and [`QaError::InvalidAttribute`] when a numeric attribute does not
/// parse.
pub fn parse_page(fragment: &[u8]) -> Result<Page> {
    let mut reader = Reader::from_reader(fragment);
    let mut buf = Vec::new();
    let mut chars = Vec::new();
    let mut current: Option<CharParams> = None;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| QaError::MalformedPage(e.to_string()))?;
        match event {
            Event::Start(ref e) if e.name().as_ref() == CHAR_TAG => {
                current = Some(CharParams::from_start(e)?);
                text.clear();
            }
            Event::Empty(ref e) if e.name().as_ref() == CHAR_TAG => {
                chars.push(CharParams::from_start(e)?);
            }
            Event::Text(ref e) => {
                if current.is_some() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| QaError::MalformedPage(err.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(ref e) if e.name().as_ref() == CHAR_TAG => {
                if let Some(mut params) = current.take() {
                    params.text = std::mem::take(&mut text);
                    chars.push(params);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(Page { number: 0, chars })
}
