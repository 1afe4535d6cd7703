// src/pipeline/collect.rs

//! Course collection pipeline.
//!
//! Walks every in-scope course: lists its modules and items, resolves the
//! syllabus source, and downloads the referenced documents. Produces the
//! in-memory table the report phase consumes. Strictly sequential; every
//! failure is logged and skipped, never fatal.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::models::{Config, Course, ModuleItem, ModuleItemType};
use crate::services::{CanvasClient, SyllabusSelection, syllabus};
use crate::storage::DownloadStore;

/// A module and its item titles, for the report listing.
#[derive(Debug, Clone)]
pub struct ModuleListing {
    pub name: String,
    pub items: Vec<String>,
}

/// Everything collected for one course, owned by the orchestrating run.
#[derive(Debug)]
pub struct CollectedCourse {
    pub course: Course,

    /// Full module walk, independent of the syllabus subset
    pub modules: Vec<ModuleListing>,

    /// Local paths of downloaded documents, in download order
    pub files: Vec<PathBuf>,
}

/// Fetch courses and collect module listings and syllabus downloads.
pub async fn run_collection(
    client: &CanvasClient,
    config: &Config,
    store: &DownloadStore,
) -> Vec<CollectedCourse> {
    log::info!("Fetching active courses...");
    let courses = client.list_courses().await;
    log::info!("{} active courses", courses.len());

    let mut collected = Vec::new();

    for course in courses {
        log::info!("Course: {}", course.name);

        if !config.filter.course_in_scope(&course.name) {
            log::debug!("  Skipped by course filter");
            continue;
        }

        let modules = client.list_modules(course.id).await;

        // One walk over all modules feeds both the report listing and the
        // syllabus item lookup.
        let mut listing = Vec::new();
        let mut items_by_module: HashMap<u64, Vec<ModuleItem>> = HashMap::new();
        for module in &modules {
            let items = client.list_module_items(course.id, module.id).await;
            listing.push(ModuleListing {
                name: module.name.clone(),
                items: items.iter().map(|item| item.title.clone()).collect(),
            });
            items_by_module.insert(module.id, items);
        }

        let mut files = Vec::new();
        match syllabus::resolve(client, &course, &modules, &config.filter).await {
            SyllabusSelection::Modules(matched) => {
                for module in matched {
                    log::info!("  Found syllabus module: {}", module.name);
                    let items = items_by_module.get(&module.id).map_or(&[][..], Vec::as_slice);
                    for item in items {
                        if let Some(path) = process_item(client, config, store, item).await {
                            files.push(path);
                        }
                    }
                }
            }
            SyllabusSelection::Fallback(body) => {
                log::info!("  No module items - pulled from course syllabus_body");
                log_syllabus_body(&body, config.extract.preview_graphemes);
            }
            SyllabusSelection::Nothing => {
                log::info!("  No syllabus module and no syllabus body");
            }
        }

        collected.push(CollectedCourse {
            course,
            modules: listing,
            files,
        });
    }

    collected
}

/// Handle one module item: log it, and download it when it is a file
/// reference with an eligible extension.
async fn process_item(
    client: &CanvasClient,
    config: &Config,
    store: &DownloadStore,
    item: &ModuleItem,
) -> Option<PathBuf> {
    if config.filter.should_skip_item(&item.title) {
        log::debug!("    Skipped by title: {}", item.title);
        return None;
    }

    log::info!("    Item: {} ({:?})", item.title, item.item_type);
    if let Some(link) = item.link() {
        log::info!("    URL: {link}");
    }

    if item.item_type != ModuleItemType::File {
        return None;
    }
    let file_id = item.content_id?;

    let meta = client.get_file(file_id).await?;
    if !config.filter.extension_allowed(&meta.display_name) {
        log::debug!("    Not a downloadable format: {}", meta.display_name);
        return None;
    }
    let url = meta.download_url()?;

    log::info!("    -> Downloading {}", meta.display_name);
    let bytes = client.download(url).await?;

    match store.save_file(&meta.display_name, &bytes).await {
        Ok(path) => {
            log::info!("       File saved: {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::warn!("       Failed to save {}: {e}", meta.display_name);
            None
        }
    }
}

/// Log the anchors and a truncated plain-text preview of an inline
/// syllabus body. Visibility only; none of this reaches the report.
fn log_syllabus_body(body: &str, preview_graphemes: usize) {
    for link in syllabus::extract_links(body) {
        log::info!("    Link: {} - {}", link.text, link.href);
    }

    let preview = syllabus::plain_text_preview(body, preview_graphemes);
    if !preview.is_empty() {
        log::info!("    Syllabus text preview:");
        log::info!("    {preview}...");
    }
}
