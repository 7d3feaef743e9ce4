#![doc = include_str!("../README.md")]
//!
//! ## Module overview
//!
//! - [`scanner`]: splits a report stream into standalone page fragments
//! - [`page`]: parses fragments and extracts `charParams` records
//! - [`reader`]: streaming page reader combining the two
//! - [`accumulator`]: character and word statistics over a page stream
//! - [`summary`]: derived per-file summaries and their text rendering
//! - [`csv`]: TSV export of summaries
//! - [`json`]: JSON export of summaries
//! - [`batch`]: best-effort processing of report files and directories
//! - [`error`]: error types
//!
//! ## Streaming model
//!
//! Reports are processed line by line. Only one page fragment is held in
//! memory at a time, so arbitrarily large reports are handled in constant
//! space. Analysis is deterministic: two runs over the same input produce
//! identical summaries, whether pages are fed sequentially or files are
//! processed in parallel.

pub mod accumulator;
pub mod batch;
pub mod csv;
pub mod error;
pub mod json;
pub mod page;
pub mod reader;
pub mod scanner;
pub mod summary;

pub use accumulator::{ConfidencePolicy, QaAccumulator, WordCheck};
pub use batch::{
    discover_reports, process_batch, process_batch_parallel, process_file, BatchReport,
    ProcessOptions, REPORT_SUFFIX,
};
pub use error::{QaError, Result};
pub use page::{parse_page, CharParams, Page, RESERVED_CONFIDENCE, WordAttributes};
pub use reader::AbbyyReader;
pub use scanner::{PageScanner, PAGE_CLOSE, PAGE_OPEN, XML_HEADER};
pub use summary::QaSummary;
