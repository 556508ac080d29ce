//! Extraction orchestration.
//!
//! One run turns a list of package files into [`PackageFile`] records:
//!
//! 1. **Ordering** - Kotlin sources (`*.kt`) are split off; the remaining files are put in
//!    processing order by [`reorder_files`]. The sequence is the Kotlin sources, the same
//!    Kotlin sources again, then the remainder. The second Kotlin pass resolves references
//!    to constants declared in a Kotlin file that came later in the first pass.
//! 2. **Loading** - every distinct path is read once, up front, through the
//!    [`FileLoader`]. A failing batch load is the only error that aborts a run.
//! 3. **Dispatch** - files are handled strictly in sequence by
//!    [`dispatch::dispatch_file`] against one [`VariableRegistry`] and one
//!    [`RegistryCatalog`] owned by the run. A file that fails is logged and skipped.
//! 4. **Merging** - [`merge::merge_dependencies`] groups the flat dependency list into
//!    per-file records and resolves registry URLs.
//!
//! # Example
//!
//! ```rust,no_run
//! use gradle_deps::config::ExtractConfig;
//! use gradle_deps::extract::extract_all_package_files;
//! use gradle_deps::parser::ReferenceParser;
//! use gradle_deps::utils::LocalFileLoader;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ExtractConfig::default();
//! let loader = LocalFileLoader::new("path/to/project");
//! let files = vec!["gradle.properties".to_string(), "build.gradle".to_string()];
//!
//! match extract_all_package_files(&config, &loader, &ReferenceParser::default(), &files).await? {
//!     Some(records) => println!("{} package files", records.len()),
//!     None => println!("No dependencies found"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Forward references are only resolved among Kotlin sources. A build script that uses a
//! variable declared by a script processed after it does not see that variable.

pub mod dispatch;
pub mod merge;

use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::models::{PackageDependency, PackageFile};
use crate::parser::BuildFileParser;
use crate::registry::RegistryCatalog;
use crate::utils::fs::FileLoader;
use crate::utils::path::{is_kotlin_source_file, reorder_files};
use crate::vars::VariableRegistry;

pub use dispatch::{Dispatch, FileKind, RunState, classify, dispatch_file};
pub use merge::merge_dependencies;

/// Everything a run collected before merging.
#[derive(Debug)]
pub struct Extraction {
    /// Dependencies in discovery order, duplicates included
    pub deps: Vec<PackageDependency>,
    /// One empty record per input path, in input order
    pub records: Vec<PackageFile>,
    pub registries: RegistryCatalog,
    pub kotlin_file_count: usize,
}

/// Processing sequence for `package_files`: Kotlin sources twice, then the rest in
/// heuristic order.
pub fn processing_order(package_files: &[String]) -> Vec<String> {
    let (kotlin, rest): (Vec<String>, Vec<String>) = package_files
        .iter()
        .cloned()
        .partition(|path| is_kotlin_source_file(path));

    let mut sequence = Vec::with_capacity(kotlin.len() * 2 + rest.len());
    sequence.extend(kotlin.iter().cloned());
    sequence.extend(kotlin);
    sequence.extend(reorder_files(rest));
    sequence
}

/// Load and dispatch every file of `package_files`.
///
/// # Errors
///
/// Only when the loader fails for the batch as a whole. Failures of single files are
/// logged at debug level and the file is skipped.
pub async fn collect<L, P>(
    config: &ExtractConfig,
    loader: &L,
    parser: &P,
    package_files: &[String],
) -> Result<Extraction>
where
    L: FileLoader,
    P: BuildFileParser,
{
    let sequence = processing_order(package_files);
    let kotlin_file_count = package_files.iter().filter(|p| is_kotlin_source_file(p)).count();

    let mut seen = HashSet::new();
    let unique: Vec<String> = package_files.iter().filter(|p| seen.insert(p.as_str())).cloned().collect();

    let files = loader
        .load_all(&unique)
        .await
        .with_context(|| format!("Failed to load package files for {}", config.run_label()))?;

    let records: Vec<PackageFile> = unique.iter().map(PackageFile::new).collect();
    let mut vars = VariableRegistry::new();
    let mut registries = RegistryCatalog::with_plugin_portal(&config.plugin_portal_url);
    let mut deps = Vec::new();
    let mut state = RunState {
        vars: &mut vars,
        registries: &mut registries,
        deps: &mut deps,
    };

    for path in &sequence {
        if let Err(err) = dispatch_file(parser, path, &files, &mut state) {
            debug!(
                repository = config.run_label(),
                package_file = %path,
                "Failed to process package file: {err}"
            );
        }
    }

    info!(
        repository = config.run_label(),
        files = unique.len(),
        deps = deps.len(),
        registries = registries.len(),
        variable_scopes = vars.scope_count(),
        "Extracted Gradle dependencies"
    );

    Ok(Extraction {
        deps,
        records,
        registries,
        kotlin_file_count,
    })
}

/// Extract the dependencies of `package_files`, grouped by the file owning each version.
///
/// Returns `Ok(None)` when nothing was found.
///
/// # Errors
///
/// Only when loading the files fails as a whole; see [`collect`].
pub async fn extract_all_package_files<L, P>(
    config: &ExtractConfig,
    loader: &L,
    parser: &P,
    package_files: &[String],
) -> Result<Option<Vec<PackageFile>>>
where
    L: FileLoader,
    P: BuildFileParser,
{
    let extraction = collect(config, loader, parser, package_files).await?;
    Ok(merge_dependencies(extraction, config))
}
