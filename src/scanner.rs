//! Page boundary detection for concatenated ABBYY report streams.
//!
//! ABBYY reports from digitization pipelines concatenate one `<page>` document
//! per scanned page into a single XML stream, usually gzip-compressed. The
//! stream as a whole is too large to parse at once, but page boundaries always
//! sit at line starts: a line beginning with `<page` opens a fragment and a
//! line beginning with `</page` closes it. This module scans the stream line
//! by line and hands back one reparseable fragment at a time, so memory use is
//! bounded by the largest page rather than the file.
//!
//! # Example
//!
//! ```
//! use abbyyqa::scanner::PageScanner;
//!
//! let report = "<?xml version=\"1.0\"?>\n<document>\n<page width=\"100\" height=\"100\">\n</page>\n</document>\n";
//! let mut scanner = PageScanner::new(report.as_bytes());
//!
//! while let Some(fragment) = scanner.next_page()? {
//!     println!("fragment of {} bytes", fragment.len());
//! }
//! assert_eq!(scanner.pages_seen(), 1);
//! # Ok::<(), abbyyqa::QaError>(())
//! ```

use crate::error::{QaError, Result};
use std::io::BufRead;

/// XML declaration prepended to each fragment so it parses as a standalone
/// document.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Line prefix that opens a page fragment.
pub const PAGE_OPEN: &str = "<page";

/// Line prefix that closes a page fragment.
pub const PAGE_CLOSE: &str = "</page";

/// Streaming scanner that splits a report into standalone page fragments.
///
/// The scanner reads lines from the underlying stream and groups the lines of
/// each page, inclusive of the opening and closing marker lines. Lines outside
/// any page (the report preamble, document wrapper tags, trailing content) are
/// skipped. Each returned fragment is prefixed with an XML declaration so it
/// can be parsed on its own.
#[derive(Debug)]
pub struct PageScanner<R: BufRead> {
    reader: R,
    open_marker: Vec<u8>,
    close_marker: Vec<u8>,
    header: Vec<u8>,
    /// Scratch line buffer reused across reads
    line: Vec<u8>,
    pages_seen: usize,
}

impl<R: BufRead> PageScanner<R> {
    /// Create a scanner with the standard `<page` / `</page` markers.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            open_marker: PAGE_OPEN.as_bytes().to_vec(),
            close_marker: PAGE_CLOSE.as_bytes().to_vec(),
            header: XML_HEADER.as_bytes().to_vec(),
            line: Vec::with_capacity(256),
            pages_seen: 0,
        }
    }

    /// Override the line prefixes that delimit a fragment.
    ///
    /// Useful for report variants that wrap pages in a different element.
    #[must_use]
    pub fn with_markers(mut self, open: &str, close: &str) -> Self {
        self.open_marker = open.as_bytes().to_vec();
        self.close_marker = close.as_bytes().to_vec();
        self
    }

    /// Override the XML declaration prepended to each fragment.
    #[must_use]
    pub fn with_header(mut self, header: &str) -> Self {
        self.header = header.as_bytes().to_vec();
        self
    }

    /// Number of complete fragments returned so far.
    #[must_use]
    pub fn pages_seen(&self) -> usize {
        self.pages_seen
    }

    /// Read the next page fragment from the stream.
    ///
    /// Returns `Ok(None)` at a clean end of stream, i.e. one that falls
    /// between pages. A stream that ends after an opening marker but before
    /// the matching close is reported as [`QaError::TruncatedPage`].
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the underlying stream fails or the
    /// stream ends inside a fragment.
    pub fn next_page(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            if !self.fill_line()? {
                return Ok(None);
            }
            if self.line.starts_with(&self.open_marker) {
                return self.finish_page().map(Some);
            }
        }
    }

    /// Collect lines from the already-read opening line through the closing
    /// marker line, inclusive.
    fn finish_page(&mut self) -> Result<Vec<u8>> {
        let mut fragment = Vec::with_capacity(self.header.len() + self.line.len() + 1024);
        fragment.extend_from_slice(&self.header);
        fragment.push(b'\n');
        loop {
            fragment.extend_from_slice(&self.line);
            if !fragment.ends_with(b"\n") {
                fragment.push(b'\n');
            }
            if self.line.starts_with(&self.close_marker) {
                self.pages_seen += 1;
                return Ok(fragment);
            }
            if !self.fill_line()? {
                return Err(QaError::TruncatedPage(format!(
                    "input ended inside page {}",
                    self.pages_seen + 1
                )));
            }
        }
    }

    /// Read one line into the scratch buffer. Returns false at end of stream.
    fn fill_line(&mut self) -> Result<bool> {
        self.line.clear();
        let read = self.reader.read_until(b'\n', &mut self.line)?;
        Ok(read > 0)
    }
}
