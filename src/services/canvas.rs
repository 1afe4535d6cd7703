// src/services/canvas.rs

//! Canvas REST API client.
//!
//! Every operation fails soft: a transport error, a non-success status, or a
//! body that does not decode logs a diagnostic and degrades to an empty list
//! (or `None` for single-record reads). Nothing here returns an error to the
//! caller, and nothing is retried.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::models::{ApiConfig, Assignment, Course, CourseDetail, FileMeta, Module, ModuleItem};

/// Client for the Canvas REST API, holding the one HTTP client of the run.
pub struct CanvasClient {
    client: Client,
    base_url: String,
    token: String,
    per_page: u32,
}

impl CanvasClient {
    /// Create a new API client. The base URL is validated here, once.
    pub fn new(client: Client, config: &ApiConfig, token: impl Into<String>) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            token: token.into(),
            per_page: config.per_page,
        })
    }

    /// List courses with an active enrollment, all pages merged.
    pub async fn list_courses(&self) -> Vec<Course> {
        self.get_paged(
            "courses",
            &[("enrollment_state", "active")],
            "course list",
        )
        .await
    }

    /// Fetch a single course record, which carries the inline syllabus body.
    pub async fn get_course(&self, course_id: u64) -> Option<CourseDetail> {
        self.get_object(
            &format!("courses/{course_id}"),
            &format!("course {course_id}"),
        )
        .await
    }

    /// List the modules of a course, all pages merged.
    pub async fn list_modules(&self, course_id: u64) -> Vec<Module> {
        self.get_paged(
            &format!("courses/{course_id}/modules"),
            &[],
            &format!("modules of course {course_id}"),
        )
        .await
    }

    /// List the items of a module, all pages merged.
    pub async fn list_module_items(&self, course_id: u64, module_id: u64) -> Vec<ModuleItem> {
        self.get_paged(
            &format!("courses/{course_id}/modules/{module_id}/items"),
            &[],
            &format!("items of module {module_id}"),
        )
        .await
    }

    /// Fetch metadata for a single file, including its signed download URL.
    pub async fn get_file(&self, file_id: u64) -> Option<FileMeta> {
        self.get_object(&format!("files/{file_id}"), &format!("file {file_id}"))
            .await
    }

    /// List the assignments of a course, all pages merged.
    pub async fn list_assignments(&self, course_id: u64) -> Vec<Assignment> {
        self.get_paged(
            &format!("courses/{course_id}/assignments"),
            &[],
            &format!("assignments of course {course_id}"),
        )
        .await
    }

    /// Download a file from its signed URL.
    pub async fn download(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Download request failed for {url}: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::warn!("Download failed for {url}: HTTP {status}");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                log::warn!("Download body read failed for {url}: {e}");
                None
            }
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Walk `page=1,2,…` until a short or empty page and merge the results.
    async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, &str)],
        context: &str,
    ) -> Vec<T> {
        let mut all = Vec::new();

        for page in 1u32.. {
            let page_param = page.to_string();
            let per_page_param = self.per_page.to_string();
            let mut query: Vec<(&str, &str)> = vec![
                ("page", page_param.as_str()),
                ("per_page", per_page_param.as_str()),
            ];
            query.extend_from_slice(extra_query);

            let batch: Vec<T> = self.get_page(path, &query, context).await;
            let short_page = batch.len() < self.per_page as usize;
            all.extend(batch);

            if short_page {
                break;
            }
        }

        all
    }

    /// Fetch one page of a list endpoint and decode it into typed records.
    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Vec<T> {
        let Some(value) = self.get_json(path, query, context).await else {
            return Vec::new();
        };

        let items = match value {
            Value::Array(items) => items,
            other => {
                // Auth failures come back as a JSON object, not an array.
                log::warn!("Canvas response for {context} is valid JSON but not an array");
                log::debug!("{context} response body: {other}");
                return Vec::new();
            }
        };

        match serde_json::from_value::<Vec<T>>(Value::Array(items)) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Failed to decode {context}: {e}");
                Vec::new()
            }
        }
    }

    /// Fetch a single record endpoint.
    async fn get_object<T: DeserializeOwned>(&self, path: &str, context: &str) -> Option<T> {
        let value = self.get_json(path, &[], context).await?;
        match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Failed to decode {context}: {e}");
                None
            }
        }
    }

    /// Perform an authorized GET and parse the body as JSON, logging each
    /// distinct failure mode.
    async fn get_json(&self, path: &str, query: &[(&str, &str)], context: &str) -> Option<Value> {
        let url = self.endpoint(path);

        let response = match self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Canvas request failed for {context}: {e}");
                return None;
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Canvas body read failed for {context}: {e}");
                return None;
            }
        };

        if !status.is_success() {
            log::warn!("Canvas API error {status} for {context}: {body}");
            return None;
        }

        match serde_json::from_str(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Canvas response for {context} is not valid JSON: {e}");
                None
            }
        }
    }
}
