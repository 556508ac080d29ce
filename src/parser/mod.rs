//! Sub-format parsers.
//!
//! The orchestrator treats parsing as a collaborator: every sub-format is a pure function
//! from text (plus, for some formats, the visible variables and the full file-content
//! map) to a [`ParseOutput`]. Parsers report what they found; they never touch the
//! variable store or the registry catalog themselves.
//!
//! [`BuildFileParser`] is that contract. [`ReferenceParser`] implements it with shallow,
//! line-oriented scanners that recognise the common declaration shapes of each format:
//!
//! | Sub-format | Module | Inputs |
//! |---|---|---|
//! | `gradle.properties` | [`properties`] | text |
//! | version catalog (`*.toml`) | [`catalog`] | text |
//! | `versions.props` (consistent versions) | [`gcv`] | full content map |
//! | Kotlin `buildSrc` sources (`*.kt`) | [`kotlin`] | text, variables |
//! | Groovy / Kotlin DSL scripts | [`gradle`] | text, variables, full content map |
//!
//! They are not grammars. Declarations spread over several lines, computed values and
//! anything that needs evaluation are skipped rather than guessed.

pub mod catalog;
pub mod common;
pub mod gcv;
pub mod gradle;
pub mod kotlin;
pub mod properties;

use crate::constants::DEFAULT_MAX_APPLY_DEPTH;
use crate::core::Result;
use crate::models::{PackageDependency, PackageRegistry, VariableMap};
use crate::utils::fs::FileContents;

/// What a parser found in one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutput {
    pub deps: Vec<PackageDependency>,
    pub vars: VariableMap,
    pub registries: Vec<PackageRegistry>,
}

impl ParseOutput {
    pub fn with_deps(deps: Vec<PackageDependency>) -> Self {
        Self {
            deps,
            ..Self::default()
        }
    }
}

/// Parsing contract for every sub-format the dispatcher routes to.
pub trait BuildFileParser {
    /// `gradle.properties`: every entry becomes a variable; coordinate values become
    /// dependencies.
    fn parse_props(&self, content: &str, package_file: &str) -> Result<ParseOutput>;

    /// Version catalog TOML.
    fn parse_catalog(&self, content: &str, package_file: &str) -> Result<ParseOutput>;

    /// `versions.props` of the consistent-versions plugin. Needs the sibling
    /// `versions.lock`, hence the full content map.
    fn parse_gcv(&self, package_file: &str, files: &FileContents) -> Result<ParseOutput>;

    /// Kotlin sources declaring version constants.
    fn parse_kotlin_source(
        &self,
        content: &str,
        vars: &VariableMap,
        package_file: &str,
    ) -> Result<ParseOutput>;

    /// Groovy or Kotlin DSL build scripts. The content map is used to follow
    /// `apply from:` includes.
    fn parse_gradle(
        &self,
        content: &str,
        vars: &VariableMap,
        package_file: &str,
        files: &FileContents,
    ) -> Result<ParseOutput>;
}

/// Line-oriented parsers for the common declaration shapes of each sub-format.
#[derive(Debug, Clone)]
pub struct ReferenceParser {
    max_apply_depth: usize,
}

impl Default for ReferenceParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_APPLY_DEPTH)
    }
}

impl ReferenceParser {
    pub fn new(max_apply_depth: usize) -> Self {
        Self { max_apply_depth }
    }
}

impl BuildFileParser for ReferenceParser {
    fn parse_props(&self, content: &str, package_file: &str) -> Result<ParseOutput> {
        Ok(properties::parse_props(content, package_file))
    }

    fn parse_catalog(&self, content: &str, package_file: &str) -> Result<ParseOutput> {
        catalog::parse_catalog(content, package_file).map(ParseOutput::with_deps)
    }

    fn parse_gcv(&self, package_file: &str, files: &FileContents) -> Result<ParseOutput> {
        gcv::parse_gcv(package_file, files).map(ParseOutput::with_deps)
    }

    fn parse_kotlin_source(
        &self,
        content: &str,
        vars: &VariableMap,
        package_file: &str,
    ) -> Result<ParseOutput> {
        Ok(kotlin::parse_kotlin_source(content, vars, package_file))
    }

    fn parse_gradle(
        &self,
        content: &str,
        vars: &VariableMap,
        package_file: &str,
        files: &FileContents,
    ) -> Result<ParseOutput> {
        gradle::GradleScriptParser::new(files, self.max_apply_depth).parse(content, vars, package_file)
    }
}
