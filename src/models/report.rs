//! Output records for the consolidated course report.
//!
//! Field names serialize in camelCase to match the report consumers.

use serde::Serialize;

use crate::models::Assignment;

/// The whole report written to `output.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    /// The up-to-three soonest future due dates across all courses, ascending
    pub closest_due_dates: Vec<UpcomingDue>,

    pub courses: Vec<CourseReport>,
}

/// Per-course summary. Only courses with at least one downloaded file appear.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    pub class_name: String,

    /// Newline-joined text extracted from the course's downloaded files
    pub syllabus_text: String,

    pub assignments: Vec<AssignmentReport>,

    pub modules: Vec<ModuleReport>,
}

/// An assignment as it appears in the report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentReport {
    pub name: String,

    /// RFC 3339, or null when the assignment has no due date
    pub due_date: Option<String>,

    pub url: Option<String>,
}

impl From<&Assignment> for AssignmentReport {
    fn from(assignment: &Assignment) -> Self {
        Self {
            name: assignment.name.clone(),
            due_date: assignment.due_at.map(|d| d.to_rfc3339()),
            url: assignment.html_url.clone(),
        }
    }
}

/// A module and its item titles, from the full module walk.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReport {
    pub module_name: String,
    pub items: Vec<String>,
}

/// One entry of the closest-due-dates ranking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDue {
    pub assignment_name: String,

    /// RFC 3339
    pub due_date: String,

    pub class_name: String,

    pub url: Option<String>,
}
