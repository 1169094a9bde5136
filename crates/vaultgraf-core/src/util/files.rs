//! Async file utilities for walking a documentation vault.
//!
//! Provides unified file discovery and tolerant document reading used by
//! the CLI handlers and the frontmatter audit.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Options for discovering files under a vault directory.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extension to match (without dot), e.g., "md"
    pub extension: Option<&'static str>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl FindOptions {
    /// Create options for finding markdown files.
    pub fn markdown() -> Self {
        Self {
            extension: Some("md"),
            max_depth: None,
        }
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching criteria in a directory.
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result.map_err(|e| Error::Io(e.into()))?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if let Some(max_depth) = options.max_depth {
            let depth = path
                .strip_prefix(base_path)
                .map(|p| p.components().count())
                .unwrap_or(0);
            if depth > max_depth {
                continue;
            }
        }

        if let Some(ext) = options.extension {
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        files.push(FileInfo {
            path: path.to_path_buf(),
            stem,
            relative_path,
        });
    }

    log::debug!("found {} file(s) under {}", files.len(), base_path.display());
    Ok(files)
}

/// List immediate subdirectories of a path.
pub async fn list_subdirectories(base_path: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let mut entries = fs::read_dir(base_path)
        .await
        .map_err(|e| Error::io_with_path(e, base_path))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(e, base_path))?
    {
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// Read a document as UTF-8 text.
///
/// A missing file or invalid encoding yields [`Error::DocumentUnreadable`],
/// which callers recover from by skipping the document.
pub async fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| Error::document_unreadable(path, e.to_string()))?;

    String::from_utf8(bytes)
        .map_err(|e| Error::document_unreadable(path, format!("invalid UTF-8: {e}")))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
