// src/pipeline/report.rs

//! Report assembly pipeline.
//!
//! Extracts text from the downloaded documents, fetches each course's
//! assignments, ranks the globally-nearest future due dates, and writes the
//! consolidated report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::extract;
use crate::models::{
    Assignment, AssignmentReport, Config, CourseReport, FinalReport, ModuleReport, UpcomingDue,
};
use crate::pipeline::collect::CollectedCourse;
use crate::services::CanvasClient;
use crate::storage::DownloadStore;

/// How many upcoming due dates the report surfaces.
const UPCOMING_LIMIT: usize = 3;

/// Build and write the final report from the collected table.
///
/// Courses with zero downloaded files are absent from the report.
pub async fn run_report(
    client: &CanvasClient,
    config: &Config,
    collected: &[CollectedCourse],
    store: &DownloadStore,
) -> Result<PathBuf> {
    log::info!("Now extracting...");

    let mut per_course: Vec<(&CollectedCourse, Vec<Assignment>)> = Vec::new();
    for entry in collected {
        if entry.files.is_empty() {
            continue;
        }
        // Assignments are fetched fresh here, at assembly time.
        let assignments = client.list_assignments(entry.course.id).await;
        per_course.push((entry, assignments));
    }

    let now = Utc::now();
    let closest_due_dates = closest_due_dates(&per_course, now, UPCOMING_LIMIT);

    let mut courses = Vec::new();
    for (entry, assignments) in &per_course {
        courses.push(build_course_report(entry, assignments, config));
    }

    let report = FinalReport {
        closest_due_dates,
        courses,
    };

    let path = store
        .write_report(&config.output.report_filename, &report)
        .await?;
    log::info!("Extraction complete. Output saved to {}", path.display());

    Ok(path)
}

/// Assemble one course's report entry.
fn build_course_report(
    entry: &CollectedCourse,
    assignments: &[Assignment],
    config: &Config,
) -> CourseReport {
    let mut texts = Vec::new();
    for path in &entry.files {
        if let Some(text) = extract::extract_text(path, &config.extract) {
            if !text.trim().is_empty() {
                texts.push(text);
            }
        }
    }

    CourseReport {
        class_name: entry.course.name.clone(),
        syllabus_text: texts.join("\n"),
        assignments: assignments.iter().map(AssignmentReport::from).collect(),
        modules: entry
            .modules
            .iter()
            .map(|m| ModuleReport {
                module_name: m.name.clone(),
                items: m.items.clone(),
            })
            .collect(),
    }
}

/// Rank the future-dated assignments across all courses, soonest first.
///
/// Assignments without a parseable due date, or due at or before `now`, are
/// excluded. The sort is stable, so ties keep encounter order.
fn closest_due_dates(
    per_course: &[(&CollectedCourse, Vec<Assignment>)],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<UpcomingDue> {
    struct Candidate<'a> {
        due: DateTime<Utc>,
        assignment: &'a Assignment,
        class_name: &'a str,
    }

    let mut candidates: Vec<Candidate> = per_course
        .iter()
        .flat_map(|(entry, assignments)| {
            assignments.iter().filter_map(|assignment| {
                let due = assignment.due_at?;
                (due > now).then_some(Candidate {
                    due,
                    assignment,
                    class_name: entry.course.name.as_str(),
                })
            })
        })
        .collect();

    candidates.sort_by_key(|c| c.due);
    candidates.truncate(limit);

    candidates
        .into_iter()
        .map(|c| UpcomingDue {
            assignment_name: c.assignment.name.clone(),
            due_date: c.due.to_rfc3339(),
            class_name: c.class_name.to_string(),
            url: c.assignment.html_url.clone(),
        })
        .collect()
}
