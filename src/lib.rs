//! gradle-deps - Gradle dependency extraction
//!
//! Reads the build files of a Gradle project and reports every external dependency
//! together with the exact file and byte position of its version text, plus the package
//! registries that may serve it. The output is meant for tools that rewrite versions in
//! place.
//!
//! # Architecture Overview
//!
//! An extraction run works on a list of project-relative package files:
//!
//! - every file is loaded once, up front, through a [`utils::FileLoader`]
//! - files are classified by path and handed to the matching sub-format parser
//! - variables (properties, `ext`, Kotlin constants) flow through a directory-scoped
//!   [`vars::VariableRegistry`] so later files resolve references to earlier ones
//! - registries declared in `repositories { }` blocks are collected in a
//!   [`registry::RegistryCatalog`], with content descriptors and exclusive content
//! - finally each dependency is attached to the file that owns its version and given its
//!   registry URLs
//!
//! ## Supported Files
//!
//! | File | Handling |
//! |---|---|
//! | `gradle.properties` | variables, `group:artifact:version` values |
//! | `*.versions.toml` | version catalog libraries and plugins |
//! | `versions.props` + `versions.lock` | consistent-versions pins |
//! | `buildSrc/**/*.kt` | Kotlin constants and dependency strings |
//! | `*.gradle`, `*.gradle.kts` | Groovy and Kotlin DSL scripts |
//!
//! # Core Modules
//!
//! - [`extract`] - run orchestration, per-file dispatch and merging
//! - [`parser`] - the sub-format parsers behind [`parser::BuildFileParser`]
//! - [`registry`] - registry catalog, content matching and URL resolution
//! - [`vars`] - the directory-scoped variable registry
//! - [`version`] - Gradle version ordering and dynamic version matching
//!
//! ## Supporting Modules
//!
//! - [`cli`] - the `gradle-deps` command line
//! - [`config`] - run configuration loaded from TOML
//! - [`core`] - error types and user-facing error rendering
//! - [`models`] - output records and registry models
//! - [`utils`] - file loading, discovery and path classification
//! - [`constants`] - well-known URLs, file names and defaults
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Extract everything under the current directory as JSON
//! gradle-deps extract
//!
//! # Human-readable overview of another project
//! gradle-deps extract --root ../service --format summary
//!
//! # With debug logging and a config file
//! gradle-deps --verbose --config gradle-deps.toml extract
//! ```

// Core functionality modules
pub mod extract;
pub mod parser;
pub mod registry;
pub mod vars;
pub mod version;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod utils;

// Test utilities (only compiled in test mode or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
