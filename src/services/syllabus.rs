// src/services/syllabus.rs

//! Syllabus module selection.
//!
//! Picks the modules that look like a syllabus by name; when none match,
//! falls back to the course's inline `syllabus_body` HTML.

use scraper::{Html, Selector};
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Course, FilterConfig, Module};
use crate::services::CanvasClient;

/// Where a course's syllabus content comes from.
#[derive(Debug, Clone)]
pub enum SyllabusSelection {
    /// Modules whose name matched a syllabus keyword
    Modules(Vec<Module>),

    /// At most one fallback, wrapping the course's inline syllabus HTML.
    /// Chosen only when no module name matched.
    Fallback(String),

    /// No matching module and no syllabus body
    Nothing,
}

/// An anchor found in the inline syllabus HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllabusLink {
    pub text: String,
    pub href: String,
}

/// Return the modules whose lowercase name contains any syllabus keyword.
pub fn select_syllabus_modules(modules: &[Module], filter: &FilterConfig) -> Vec<Module> {
    modules
        .iter()
        .filter(|m| filter.is_syllabus_module(&m.name))
        .cloned()
        .collect()
}

/// Resolve the syllabus source for a course.
///
/// The course record is fetched only when the name filter finds nothing.
pub async fn resolve(
    client: &CanvasClient,
    course: &Course,
    modules: &[Module],
    filter: &FilterConfig,
) -> SyllabusSelection {
    let matched = select_syllabus_modules(modules, filter);
    if !matched.is_empty() {
        return SyllabusSelection::Modules(matched);
    }

    let Some(detail) = client.get_course(course.id).await else {
        return SyllabusSelection::Nothing;
    };

    match detail.syllabus_body {
        Some(body) if !body.trim().is_empty() => SyllabusSelection::Fallback(body),
        _ => SyllabusSelection::Nothing,
    }
}

/// Enumerate anchor elements (visible text + href) in a syllabus body.
pub fn extract_links(html: &str) -> Vec<SyllabusLink> {
    let document = Html::parse_document(html);
    let anchor = Selector::parse("a[href]").expect("static selector");

    document
        .select(&anchor)
        .filter_map(|element| {
            let href = element.value().attr("href")?.to_string();
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            Some(SyllabusLink {
                text: text.trim().to_string(),
                href,
            })
        })
        .collect()
}

/// Strip tags from a syllabus body and truncate to a grapheme limit.
///
/// The preview is logged for operator visibility only; it never reaches the
/// report.
pub fn plain_text_preview(html: &str, max_graphemes: usize) -> String {
    let document = Html::parse_document(html);
    let text: String = document.root_element().text().collect::<Vec<_>>().join(" ");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.graphemes(true).take(max_graphemes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: u64, name: &str) -> Module {
        Module {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn selects_modules_by_keyword() {
        let modules = vec![
            module(1, "Course Syllabus"),
            module(2, "Week 1"),
            module(3, "Start Here"),
            module(4, "INTRODUCTION"),
        ];
        let selected = select_syllabus_modules(&modules, &FilterConfig::default());
        let names: Vec<&str> = selected.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Course Syllabus", "Start Here", "INTRODUCTION"]);
    }

    #[test]
    fn selects_nothing_when_no_keyword_matches() {
        let modules = vec![module(1, "Week 1"), module(2, "Week 2")];
        assert!(select_syllabus_modules(&modules, &FilterConfig::default()).is_empty());
    }

    #[test]
    fn extracts_anchor_text_and_href() {
        let html = r#"<p>See <a href="https://example.com/syllabus.pdf">the syllabus</a>
            and <a href="/grading">grading <b>rules</b></a>.</p>"#;
        let links = extract_links(html);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "https://example.com/syllabus.pdf");
        assert_eq!(links[0].text, "the syllabus");
        assert_eq!(links[1].text, "grading rules");
    }

    #[test]
    fn preview_strips_tags_and_collapses_whitespace() {
        let html = "<h1>Welcome</h1>\n<p>to   the\ncourse</p>";
        assert_eq!(plain_text_preview(html, 500), "Welcome to the course");
    }

    #[test]
    fn preview_truncates_by_graphemes() {
        let html = "<p>héllo wörld</p>";
        assert_eq!(plain_text_preview(html, 5), "héllo");
    }
}
