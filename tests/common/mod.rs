//! Shared helpers for building synthetic ABBYY reports in tests.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Render one `charParams` element with the given attributes.
pub fn char_node(text: &str, attrs: &[(&str, &str)]) -> String {
    let mut node = String::from("<charParams");
    for (name, value) in attrs {
        node.push_str(&format!(" {name}=\"{value}\""));
    }
    node.push('>');
    node.push_str(text);
    node.push_str("</charParams>");
    node
}

/// Wrap character lines in the block structure the recognizer emits, one
/// element per line so page markers always sit at line starts.
pub fn page_fragment(char_lines: &[String]) -> String {
    let mut page = String::from(
        "<page width=\"2480\" height=\"3508\" resolution=\"300\" originalCoords=\"1\">\n\
         <block blockType=\"Text\" l=\"205\" t=\"210\" r=\"2275\" b=\"3298\">\n\
         <text>\n<par>\n<line baseline=\"260\" l=\"205\" t=\"212\" r=\"780\" b=\"262\">\n\
         <formatting lang=\"EnglishUnitedStates\">\n",
    );
    for line in char_lines {
        page.push_str(line);
        page.push('\n');
    }
    page.push_str("</formatting>\n</line>\n</par>\n</text>\n</block>\n</page>\n");
    page
}

/// Concatenate page fragments into a full report document.
pub fn report_document(pages: &[String]) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <document xmlns=\"http://www.abbyy.com/FineReader_xml/FineReader6-schema-v1.xml\" \
         version=\"1.0\" producer=\"FineReader 8.0\">\n",
    );
    for page in pages {
        doc.push_str(page);
    }
    doc.push_str("</document>\n");
    doc
}

/// A minimal single-word, two-character page.
pub fn two_char_page() -> String {
    page_fragment(&[
        char_node(
            "a",
            &[
                ("wordStart", "true"),
                ("wordFromDictionary", "true"),
                ("charConfidence", "200"),
            ],
        ),
        char_node("b", &[("charConfidence", "100")]),
    ])
}

/// Gzip-compress a report document.
pub fn gzip_bytes(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// Write a gzip-compressed report file under `dir`.
pub fn write_report(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, gzip_bytes(content)).unwrap();
    path
}

/// Write an uncompressed report file under `dir`.
pub fn write_plain_report(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
