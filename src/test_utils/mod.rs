//! Test utilities for gradle-deps
//!
//! Helpers shared by the unit and integration suites: an in-memory [`FileLoader`] so
//! extraction runs can be driven without touching the filesystem, and one-time logging
//! setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use gradle_deps::config::ExtractConfig;
//! use gradle_deps::extract::extract_all_package_files;
//! use gradle_deps::parser::ReferenceParser;
//! use gradle_deps::test_utils::InMemoryLoader;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let loader = InMemoryLoader::new()
//!     .with_file("gradle.properties", "slf4jVersion=2.0.9\n")
//!     .with_file("build.gradle", "implementation \"org.slf4j:slf4j-api:$slf4jVersion\"\n");
//! let files = loader.paths();
//!
//! let records = extract_all_package_files(&ExtractConfig::default(), &loader, &ReferenceParser::default(), &files)
//!     .await?
//!     .unwrap();
//! assert_eq!(records[0].deps[0].current_value.as_deref(), Some("2.0.9"));
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::ExtractError;
use crate::utils::fs::{FileContents, FileLoader};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set, that level is used; otherwise
/// `RUST_LOG` is honoured, and without either nothing is logged.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// gradle_deps::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=gradle_deps=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A [`FileLoader`] backed by a map of project-relative paths to contents.
///
/// Paths that were never added load as `None`. A loader built with [`failing`] rejects
/// every batch, which is how a broken platform layer is simulated.
///
/// [`failing`]: InMemoryLoader::failing
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    files: Vec<(String, String)>,
    failure: Option<String>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader whose every batch load fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            files: Vec::new(),
            failure: Some(reason.into()),
        }
    }

    /// Add (or replace) a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        match self.files.iter_mut().find(|(known, _)| *known == path) {
            Some(entry) => entry.1 = content,
            None => self.files.push((path, content)),
        }
        self
    }

    /// Every stored path, in insertion order.
    pub fn paths(&self) -> Vec<String> {
        self.files.iter().map(|(path, _)| path.clone()).collect()
    }
}

impl FileLoader for InMemoryLoader {
    async fn load_all(&self, paths: &[String]) -> Result<FileContents> {
        if let Some(reason) = &self.failure {
            return Err(ExtractError::LoadFailed {
                reason: reason.clone(),
            }
            .into());
        }

        Ok(paths
            .iter()
            .map(|path| {
                let content = self.files.iter().find(|(known, _)| known == path).map(|(_, c)| c.clone());
                (path.clone(), content)
            })
            .collect())
    }
}

/// Build a [`FileContents`] map where every file is present.
pub fn contents(files: &[(&str, &str)]) -> FileContents {
    files
        .iter()
        .map(|(path, content)| ((*path).to_string(), Some((*content).to_string())))
        .collect()
}
