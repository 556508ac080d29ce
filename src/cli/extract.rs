//! The `extract` command.
//!
//! Reads a Gradle project and prints its dependencies, grouped by the file that owns each
//! version.
//!
//! # Examples
//!
//! Extract everything under the current directory:
//! ```bash
//! gradle-deps extract
//! ```
//!
//! A one-line-per-dependency overview of another project:
//! ```bash
//! gradle-deps extract --root ../service --format summary
//! ```
//!
//! Only some files (paths relative to `--root`):
//! ```bash
//! gradle-deps extract gradle.properties build.gradle app/build.gradle
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use crate::config::ExtractConfig;
use crate::extract::extract_all_package_files;
use crate::models::PackageFile;
use crate::parser::ReferenceParser;
use crate::utils::fs::{LocalFileLoader, discover_package_files};

/// Output format of the `extract` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of package files
    Json,
    /// One line per dependency
    Summary,
}

/// Extract dependencies from a Gradle project.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Project root; package file paths are relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output format: json or summary
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Package files to process. When omitted, every candidate file under the root is
    /// discovered.
    pub files: Vec<String>,
}

impl ExtractCommand {
    /// Run the extraction with `config` and print the result.
    ///
    /// # Errors
    ///
    /// Fails when discovery or loading fails, or when the output cannot be written.
    pub async fn execute(self, config: &ExtractConfig) -> Result<()> {
        let files = if self.files.is_empty() {
            discover_package_files(&self.root, &config.ignore_dirs)
                .with_context(|| format!("Failed to discover package files in {}", self.root.display()))?
        } else {
            self.files.clone()
        };
        debug!(root = %self.root.display(), files = files.len(), "Starting extraction");

        let loader = LocalFileLoader::new(&self.root);
        let parser = ReferenceParser::new(config.max_apply_depth);
        let result = extract_all_package_files(config, &loader, &parser, &files).await?;

        match (result, self.format) {
            (None, _) => println!("No dependencies found"),
            (Some(records), OutputFormat::Json) => {
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
            (Some(records), OutputFormat::Summary) => print_summary(&records),
        }
        Ok(())
    }
}

fn print_summary(records: &[PackageFile]) {
    for record in records.iter().filter(|r| !r.deps.is_empty()) {
        println!("{}", record.package_file.bold());
        for dep in &record.deps {
            let name = dep.dep_name.as_deref().unwrap_or("<unnamed>");
            let version = dep.current_value.as_deref().unwrap_or("?");
            let via = dep
                .shared_variable_name
                .as_deref()
                .map(|var| format!(" (via {var})"))
                .unwrap_or_default();
            println!("  {} {}{}", name, version.green(), via.dimmed());
        }
    }
}
