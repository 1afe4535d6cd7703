//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Course/module/item filtering rules
    #[serde(default)]
    pub filter: FilterConfig,

    /// Document text extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::config("api.base_url is empty"));
        }
        if Url::parse(&self.api.base_url).is_err() {
            return Err(AppError::config(format!(
                "api.base_url is not a valid URL: {}",
                self.api.base_url
            )));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::config("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::config("api.timeout_secs must be > 0"));
        }
        if self.api.per_page == 0 || self.api.per_page > 100 {
            return Err(AppError::config("api.per_page must be in 1..=100"));
        }
        if self.filter.syllabus_keywords.is_empty() {
            return Err(AppError::config("filter.syllabus_keywords is empty"));
        }
        if self.filter.allowed_extensions.is_empty() {
            return Err(AppError::config("filter.allowed_extensions is empty"));
        }
        if self.output.report_filename.trim().is_empty() {
            return Err(AppError::config("output.report_filename is empty"));
        }
        Ok(())
    }
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Canvas REST API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Page size for paginated list endpoints (Canvas caps this at 100)
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            per_page: defaults::per_page(),
        }
    }
}

/// Course/module/item filtering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Substring a course name must contain to be processed (empty = all courses)
    #[serde(default)]
    pub course_name_contains: String,

    /// Lowercase keywords identifying syllabus modules by name
    #[serde(default = "defaults::syllabus_keywords")]
    pub syllabus_keywords: Vec<String>,

    /// Module items whose title contains any of these are skipped
    #[serde(default = "defaults::skip_title_keywords")]
    pub skip_title_keywords: Vec<String>,

    /// Download items matching the skip keywords anyway
    #[serde(default)]
    pub include_addenda: bool,

    /// File extensions eligible for download (without the leading dot)
    #[serde(default = "defaults::allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl FilterConfig {
    /// Whether a course participates in the run at all.
    pub fn course_in_scope(&self, course_name: &str) -> bool {
        self.course_name_contains.is_empty() || course_name.contains(&self.course_name_contains)
    }

    /// Whether a module name marks a syllabus module.
    pub fn is_syllabus_module(&self, module_name: &str) -> bool {
        let name = module_name.to_lowercase();
        self.syllabus_keywords.iter().any(|k| name.contains(k))
    }

    /// Whether a module item is skipped by title, regardless of its type.
    pub fn should_skip_item(&self, title: &str) -> bool {
        !self.include_addenda && self.skip_title_keywords.iter().any(|k| title.contains(k))
    }

    /// Whether a file display name carries a downloadable extension.
    pub fn extension_allowed(&self, display_name: &str) -> bool {
        let lower = display_name.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| lower.ends_with(&format!(".{ext}")))
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            course_name_contains: String::new(),
            syllabus_keywords: defaults::syllabus_keywords(),
            skip_title_keywords: defaults::skip_title_keywords(),
            include_addenda: false,
            allowed_extensions: defaults::allowed_extensions(),
        }
    }
}

/// Document text extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Log PDF extraction failures (off by default)
    #[serde(default)]
    pub log_pdf_errors: bool,

    /// Log DOCX extraction failures
    #[serde(default = "defaults::enabled")]
    pub log_docx_errors: bool,

    /// Maximum length of the logged syllabus-body preview, in grapheme clusters
    #[serde(default = "defaults::preview_graphemes")]
    pub preview_graphemes: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            log_pdf_errors: false,
            log_docx_errors: defaults::enabled(),
            preview_graphemes: defaults::preview_graphemes(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Name of the report file written into the output directory
    #[serde(default = "defaults::report_filename")]
    pub report_filename: String,

    /// Wait for one line of console input before the program exits
    #[serde(default = "defaults::enabled")]
    pub wait_on_exit: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_filename: defaults::report_filename(),
            wait_on_exit: defaults::enabled(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://ferris.instructure.com/api/v1".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sylscraper/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn per_page() -> u32 {
        100
    }

    // Filter defaults
    pub fn syllabus_keywords() -> Vec<String> {
        vec!["syllabus".into(), "introduction".into(), "start".into()]
    }
    pub fn skip_title_keywords() -> Vec<String> {
        vec!["Addendum".into(), "Wide".into()]
    }
    pub fn allowed_extensions() -> Vec<String> {
        vec!["pdf".into(), "docx".into()]
    }

    // Extraction/output defaults
    pub fn preview_graphemes() -> usize {
        500
    }
    pub fn report_filename() -> String {
        "output.json".into()
    }
    pub fn enabled() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_page() {
        let mut config = Config::default();
        config.api.per_page = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn course_scope_empty_filter_matches_all() {
        let filter = FilterConfig::default();
        assert!(filter.course_in_scope("SENG 511"));
        assert!(filter.course_in_scope("MATH 120"));
    }

    #[test]
    fn course_scope_substring_filter_excludes() {
        let filter = FilterConfig {
            course_name_contains: "SENG".to_string(),
            ..FilterConfig::default()
        };
        assert!(filter.course_in_scope("SENG 511"));
        assert!(!filter.course_in_scope("MATH 120"));
    }

    #[test]
    fn syllabus_module_match_is_case_insensitive() {
        let filter = FilterConfig::default();
        assert!(filter.is_syllabus_module("Course Syllabus"));
        assert!(filter.is_syllabus_module("START HERE"));
        assert!(filter.is_syllabus_module("Introduction & Orientation"));
        assert!(!filter.is_syllabus_module("Week 3: Sorting"));
    }

    #[test]
    fn skip_keywords_apply_unless_included() {
        let mut filter = FilterConfig::default();
        assert!(filter.should_skip_item("Ferris Addendum 2025"));
        assert!(filter.should_skip_item("University Wide Policies"));
        assert!(!filter.should_skip_item("Course Syllabus.pdf"));

        filter.include_addenda = true;
        assert!(!filter.should_skip_item("Ferris Addendum 2025"));
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        let filter = FilterConfig::default();
        assert!(filter.extension_allowed("Syllabus.PDF"));
        assert!(filter.extension_allowed("outline.docx"));
        assert!(!filter.extension_allowed("notes.txt"));
        assert!(!filter.extension_allowed("archive.docx.zip"));
    }
}
