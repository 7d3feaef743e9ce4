//! Streaming reader for ABBYY OCR reports.
//!
//! [`AbbyyReader`] combines the page scanner and the fragment parser into a
//! pull interface modeled on buffered record readers: call
//! [`read_page`](AbbyyReader::read_page) until it returns `Ok(None)`. Memory
//! use stays bounded by the largest page in the report.

use crate::error::Result;
use crate::page::{parse_page, Page};
use crate::scanner::PageScanner;
use std::io::BufRead;

/// Reader that yields parsed pages from a concatenated report stream.
///
/// The reader is generic over any buffered source, so it works equally over
/// a decompressed gzip stream, a plain file, or an in-memory buffer.
///
/// # Examples
///
/// ```
/// use abbyyqa::AbbyyReader;
///
/// let report = "<page>\n<charParams wordStart=\"true\">a</charParams>\n</page>\n";
/// let mut reader = AbbyyReader::new(report.as_bytes());
///
/// while let Some(page) = reader.read_page()? {
///     assert_eq!(page.number, 1);
///     assert_eq!(page.chars.len(), 1);
/// }
/// assert_eq!(reader.pages_read(), 1);
/// # Ok::<(), abbyyqa::QaError>(())
/// ```
#[derive(Debug)]
pub struct AbbyyReader<R: BufRead> {
    scanner: PageScanner<R>,
    pages_read: usize,
}

impl<R: BufRead> AbbyyReader<R> {
    /// Create a reader over a report stream.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            scanner: PageScanner::new(reader),
            pages_read: 0,
        }
    }

    /// Override the line prefixes that delimit a page fragment.
    #[must_use]
    pub fn with_markers(mut self, open: &str, close: &str) -> Self {
        self.scanner = self.scanner.with_markers(open, close);
        self
    }

    /// Override the XML declaration prepended to each fragment before
    /// parsing.
    #[must_use]
    pub fn with_header(mut self, header: &str) -> Self {
        self.scanner = self.scanner.with_header(header);
        self
    }

    /// Read and parse the next page.
    ///
    /// Returns `Ok(None)` at a clean end of stream. Page numbers are assigned
    /// in reading order, starting at 1.
    ///
    /// # Errors
    ///
    /// Returns an error when the stream cannot be read, ends inside a page,
    /// or a fragment fails to parse.
    pub fn read_page(&mut self) -> Result<Option<Page>> {
        match self.scanner.next_page()? {
            Some(fragment) => {
                let mut page = parse_page(&fragment)?;
                self.pages_read += 1;
                page.number = self.pages_read;
                Ok(Some(page))
            }
            None => Ok(None),
        }
    }

    /// Number of pages read so far.
    #[must_use]
    pub fn pages_read(&self) -> usize {
        self.pages_read
    }
}
