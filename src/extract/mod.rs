// src/extract/mod.rs

//! Document text extraction.
//!
//! Dispatches purely on file extension. Extraction never raises past this
//! boundary: callers always receive `Some(text)` or `None`, and whether a
//! failure is logged is a per-format diagnostic setting.

pub mod docx;
pub mod pdf;

use std::path::Path;

use crate::models::ExtractConfig;

/// Extract the text of a downloaded document, if its format is supported
/// and parseable.
pub fn extract_text(path: &Path, diagnostics: &ExtractConfig) -> Option<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => match pdf::extract(path) {
            Ok(text) => Some(text),
            Err(e) => {
                if diagnostics.log_pdf_errors {
                    log::warn!("PDF extraction failed for {}: {e}", path.display());
                }
                None
            }
        },
        Some("docx") => match docx::extract(path) {
            Ok(text) => Some(text),
            Err(e) => {
                if diagnostics.log_docx_errors {
                    log::warn!("DOCX extraction failed for {}: {e}", path.display());
                }
                None
            }
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unsupported_extension_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, "plain text").unwrap();

        assert!(extract_text(&path, &ExtractConfig::default()).is_none());
    }

    #[test]
    fn unparseable_pdf_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        assert!(extract_text(&path, &ExtractConfig::default()).is_none());
    }
}
