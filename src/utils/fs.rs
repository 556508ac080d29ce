//! File loading and package file discovery.
//!
//! Extraction reads every package file exactly once, before any parsing starts, through a
//! [`FileLoader`]. The loader must answer for every requested path: files that cannot be
//! read map to `None` and fail later, individually, when the dispatcher reaches them.
//! Only a failure of the batch itself is fatal for a run.

use anyhow::{Context, Result};
use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::ExtractError;
use crate::utils::path::{
    is_gcv_props_file, is_gradle_script_file, is_kotlin_source_file, is_props_file, is_toml_file,
};

/// Loaded file contents keyed by project-relative path. `None` marks a file that was
/// requested but could not be read.
pub type FileContents = HashMap<String, Option<String>>;

/// Batch access to package file contents.
pub trait FileLoader {
    /// Load every path in `paths`. The returned map has an entry for each of them.
    fn load_all(&self, paths: &[String]) -> impl Future<Output = Result<FileContents>> + Send;
}

/// Loads files from a project directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileLoader {
    root: PathBuf,
}

impl LocalFileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileLoader for LocalFileLoader {
    async fn load_all(&self, paths: &[String]) -> Result<FileContents> {
        let metadata = tokio::fs::metadata(&self.root)
            .await
            .with_context(|| format!("Failed to access project root: {}", self.root.display()))?;
        if !metadata.is_dir() {
            return Err(ExtractError::LoadFailed {
                reason: format!("project root is not a directory: {}", self.root.display()),
            }
            .into());
        }

        let reads = paths.iter().map(|path| {
            let full = self.root.join(path);
            async move {
                let content = match tokio::fs::read_to_string(&full).await {
                    Ok(content) => Some(content),
                    Err(err) => {
                        debug!(package_file = %path, error = %err, "Failed to read package file");
                        None
                    }
                };
                (path.clone(), content)
            }
        });

        Ok(join_all(reads).await.into_iter().collect())
    }
}

/// Whether discovery should pick up `path`. Only `*.versions.toml` catalogs are taken so
/// unrelated TOML files stay out; `versions.lock` is included so the consistent-versions
/// check can see it.
pub fn is_candidate_file(path: &str) -> bool {
    is_props_file(path)
        || (is_toml_file(path) && path.ends_with(".versions.toml"))
        || is_gcv_props_file(path)
        || path.ends_with("versions.lock")
        || is_kotlin_source_file(path)
        || is_gradle_script_file(path)
}

/// Find every candidate package file below `root`.
///
/// Directories named in `ignore_dirs` are not entered. Returned paths are relative to
/// `root`, use `/` separators, and are sorted.
pub fn discover_package_files(root: &Path, ignore_dirs: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !ignore_dirs.iter().any(|ignored| entry.file_name() == ignored.as_str())
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if is_candidate_file(&relative) {
            files.push(relative);
        }
    }

    files.sort();
    debug!("Discovered {} package files under {}", files.len(), root.display());
    Ok(files)
}
