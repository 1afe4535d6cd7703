//! File system utilities.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Characters that are illegal in filenames on at least one mainstream
/// filesystem.
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Replace every character illegal in a local filesystem path with `_`.
///
/// A name that sanitizes to nothing becomes `file`.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_control() || INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_filename("a/b\\c.pdf"), "a_b_c.pdf");
    }

    #[test]
    fn sanitize_replaces_reserved_characters() {
        assert_eq!(
            sanitize_filename("Syllabus: Fall? \"2026\" <v1>.docx"),
            "Syllabus_ Fall_ _2026_ _v1_.docx"
        );
    }

    #[test]
    fn sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("SENG 511 Syllabus.pdf"), "SENG 511 Syllabus.pdf");
    }

    #[test]
    fn sanitize_empty_name_falls_back() {
        assert_eq!(sanitize_filename("  "), "file");
        assert_eq!(sanitize_filename(""), "file");
    }
}
