//! Typed records for the Canvas REST API boundary.
//!
//! Every response is parsed into one of these structs exactly once, at the
//! API client; downstream code never touches raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// An active course as returned by the course list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: u64,

    /// Restricted enrollments can omit the name
    #[serde(default)]
    pub name: String,
}

/// A single-course read, which additionally carries the inline syllabus HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDetail {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    /// Inline syllabus HTML attached to the course record
    #[serde(default)]
    pub syllabus_body: Option<String>,
}

/// A named grouping of course content items.
#[derive(Debug, Clone, Deserialize)]
pub struct Module {
    pub id: u64,
    pub name: String,
}

/// The kinds of module item this program distinguishes.
///
/// Everything that is not a file reference or an external link collapses
/// into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ModuleItemType {
    File,
    ExternalUrl,
    #[serde(other)]
    Other,
}

/// A single entry within a module.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleItem {
    #[serde(default)]
    pub title: String,

    #[serde(rename = "type")]
    pub item_type: ModuleItemType,

    /// File id, present for `File` items
    #[serde(default)]
    pub content_id: Option<u64>,

    #[serde(default)]
    pub external_url: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,
}

impl ModuleItem {
    /// The most specific URL the item carries, if any.
    pub fn link(&self) -> Option<&str> {
        self.external_url.as_deref().or(self.html_url.as_deref())
    }
}

/// File metadata from the files endpoint, including the signed download URL.
#[derive(Debug, Clone, Deserialize)]
pub struct FileMeta {
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub url: Option<String>,
}

impl FileMeta {
    /// The signed download URL, if present and non-blank.
    pub fn download_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// An assignment with its optional due date.
#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub name: String,

    /// Absent or unparseable due dates both mean "no due date"
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub due_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub html_url: Option<String>,
}

/// Deserialize an RFC 3339 timestamp, degrading to `None` when the field is
/// missing, null, or not a parseable date.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_item_unknown_type_maps_to_other() {
        let json = r#"{"title": "Week 1 Overview", "type": "SubHeader"}"#;
        let item: ModuleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ModuleItemType::Other);
        assert!(item.content_id.is_none());
    }

    #[test]
    fn module_item_file_keeps_content_id() {
        let json = r#"{"title": "Syllabus.pdf", "type": "File", "content_id": 42}"#;
        let item: ModuleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ModuleItemType::File);
        assert_eq!(item.content_id, Some(42));
    }

    #[test]
    fn module_item_prefers_external_url() {
        let json = r#"{
            "title": "Reading",
            "type": "ExternalUrl",
            "external_url": "https://example.com/a",
            "html_url": "https://canvas.example.com/b"
        }"#;
        let item: ModuleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.link(), Some("https://example.com/a"));
    }

    #[test]
    fn assignment_parses_rfc3339_due_date() {
        let json = r#"{"name": "Lab 1", "due_at": "2026-09-01T23:59:00Z"}"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(a.due_at.unwrap().to_rfc3339(), "2026-09-01T23:59:00+00:00");
    }

    #[test]
    fn assignment_garbled_due_date_means_none() {
        let json = r#"{"name": "Lab 2", "due_at": "next tuesday"}"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert!(a.due_at.is_none());

        let json = r#"{"name": "Lab 3", "due_at": null}"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert!(a.due_at.is_none());
    }

    #[test]
    fn file_meta_blank_url_is_not_downloadable() {
        let meta = FileMeta {
            display_name: "Syllabus.pdf".to_string(),
            url: Some("   ".to_string()),
        };
        assert!(meta.download_url().is_none());
    }
}
