//! Extraction configuration.
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration.
//!
//! ```toml
//! # Included in diagnostics so log lines can be tied to a repository
//! repository = "acme/payments"
//!
//! # Fallback registry for plugins that match no declared plugin repository
//! plugin_portal_url = "https://plugins.gradle.org/m2/"
//!
//! # Maximum nesting of `apply from:` includes
//! max_apply_depth = 8
//!
//! # Directory names skipped during discovery
//! ignore_dirs = [".git", ".gradle", "build", "node_modules"]
//! ```

pub mod parser;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{DEFAULT_IGNORE_DIRS, DEFAULT_MAX_APPLY_DEPTH, GRADLE_PLUGIN_PORTAL_URL};
use crate::core::ExtractError;

pub use parser::parse_config;

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Run context attached to per-file diagnostics
    pub repository: Option<String>,
    /// Registry returned for plugins that match no declared plugin registry
    pub plugin_portal_url: String,
    /// Maximum nesting of `apply from:` includes
    pub max_apply_depth: usize,
    /// Directory names skipped by package file discovery
    pub ignore_dirs: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            repository: None,
            plugin_portal_url: GRADLE_PLUGIN_PORTAL_URL.to_string(),
            max_apply_depth: DEFAULT_MAX_APPLY_DEPTH,
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ExtractConfig {
    /// Load from `path`, or return the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or when it sets an empty
    /// `plugin_portal_url`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = match path {
            Some(path) => parse_config(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ExtractError> {
        if self.plugin_portal_url.trim().is_empty() {
            return Err(ExtractError::ConfigError {
                message: "plugin_portal_url must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Label for diagnostics.
    pub fn run_label(&self) -> &str {
        self.repository.as_deref().unwrap_or("<local>")
    }
}
