//! Local filesystem storage for downloaded files and the report.
//!
//! Everything lands flat in the output directory: the original documents
//! under sanitized names, plus the report file. Downloaded artifacts are
//! retained after the run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::utils::fs::sanitize_filename;

/// Storage rooted at the run's output directory.
#[derive(Clone)]
pub struct DownloadStore {
    root_dir: PathBuf,
}

impl DownloadStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// The output directory.
    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Destination path for a display name, sanitized.
    pub fn file_path(&self, display_name: &str) -> PathBuf {
        self.root_dir.join(sanitize_filename(display_name))
    }

    /// Persist downloaded bytes under the sanitized display name.
    pub async fn save_file(&self, display_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.file_path(display_name);
        self.write_bytes(&path, bytes).await?;
        Ok(path)
    }

    /// Serialize a value as indented JSON into the output directory,
    /// overwriting any prior file of that name.
    pub async fn write_report<T: Serialize + ?Sized>(
        &self,
        filename: &str,
        value: &T,
    ) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.root_dir.join(sanitize_filename(filename));
        self.write_bytes(&path, &bytes).await?;
        Ok(path)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}
