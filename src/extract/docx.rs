//! DOCX text extraction.
//!
//! A `.docx` file is a ZIP package; the document body lives in
//! `word/document.xml`, with the visible text inside `<w:t>` run elements.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::Result;

/// Extract the text runs of the document body, in document order,
/// whitespace-only runs dropped, joined with line breaks.
pub fn extract(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    Ok(text_runs(&xml)?.join("\n"))
}

/// Walk `<w:t>` elements and collect their non-blank text content.
fn text_runs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut runs = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(ref e) if e.name().as_ref() == b"w:t" => in_text_run = false,
            Event::Text(ref e) if in_text_run => {
                let text = e.unescape()?.to_string();
                if !text.trim().is_empty() {
                    runs.push(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const DOCUMENT_XML: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:body><w:p>"#,
        r#"<w:r><w:t>Hello</w:t></w:r>"#,
        r#"<w:r><w:t xml:space="preserve"> </w:t></w:r>"#,
        r#"<w:r><w:t>World</w:t></w:r>"#,
        r#"<w:r><w:t></w:t></w:r>"#,
        r#"</w:p></w:body></w:document>"#,
    );

    fn write_docx(path: &Path, document_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn runs_are_ordered_and_blank_runs_dropped() {
        let runs = text_runs(DOCUMENT_XML).unwrap();
        assert_eq!(runs, vec!["Hello", "World"]);
    }

    #[test]
    fn extracts_from_a_real_package() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("syllabus.docx");
        write_docx(&path, DOCUMENT_XML);

        assert_eq!(extract(&path).unwrap(), "Hello\nWorld");
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="ns"><w:body><w:p>
            <w:r><w:t>Fish &amp; Chips</w:t></w:r>
        </w:p></w:body></w:document>"#;
        assert_eq!(text_runs(xml).unwrap(), vec!["Fish & Chips"]);
    }

    #[test]
    fn package_without_document_xml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.docx");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        writer
            .start_file("word/other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        writer.finish().unwrap();

        assert!(extract(&path).is_err());
    }

    #[test]
    fn non_zip_bytes_are_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.docx");
        std::fs::write(&path, b"not a zip").unwrap();

        assert!(extract(&path).is_err());
    }
}
