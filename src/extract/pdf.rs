//! PDF text extraction.

use std::path::Path;

use lopdf::Document;

use crate::error::Result;

/// Extract the text of every page, in page order, joined with line breaks.
pub fn extract(path: &Path) -> Result<String> {
    let document = Document::load(path)?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        pages.push(document.extract_text(&[*page_number])?);
    }

    Ok(pages.join("\n"))
}
