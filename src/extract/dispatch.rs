//! Package file classification and routing.
//!
//! Every file of a run goes through [`classify`] and, if it is recognised, through
//! [`dispatch_file`]: the file's [`Dispatch`] carries exactly the inputs its parser needs,
//! and the parser's output is folded into the run's variable store, registry catalog and
//! flat dependency list.

use tracing::trace;

use crate::core::{ExtractError, Result};
use crate::models::{PackageDependency, VariableMap};
use crate::parser::{BuildFileParser, ParseOutput};
use crate::registry::RegistryCatalog;
use crate::utils::fs::FileContents;
use crate::utils::path::{
    dirname, is_gcv_props_file, is_gradle_script_file, is_kotlin_source_file, is_props_file,
    is_toml_file, to_absolute_path, uses_gcv,
};
use crate::vars::{ROOT_SCOPE, VariableRegistry};

/// Sub-format of a package file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Properties,
    VersionCatalog,
    ConsistentVersions,
    KotlinSource,
    GradleScript,
}

/// Determine the sub-format of `path`. The checks run in a fixed order and the first hit
/// wins; `versions.props` only counts when the consistent-versions plugin is active.
pub fn classify(path: &str, files: &FileContents) -> Option<FileKind> {
    if is_props_file(path) {
        Some(FileKind::Properties)
    } else if is_toml_file(path) {
        Some(FileKind::VersionCatalog)
    } else if is_gcv_props_file(path) && uses_gcv(path, files) {
        Some(FileKind::ConsistentVersions)
    } else if is_kotlin_source_file(path) {
        Some(FileKind::KotlinSource)
    } else if is_gradle_script_file(path) {
        Some(FileKind::GradleScript)
    } else {
        None
    }
}

/// Parser inputs for one file.
#[derive(Debug)]
pub enum Dispatch<'a> {
    Properties {
        content: &'a str,
    },
    VersionCatalog {
        content: &'a str,
    },
    ConsistentVersions {
        files: &'a FileContents,
    },
    KotlinSource {
        content: &'a str,
        vars: VariableMap,
    },
    GradleScript {
        content: &'a str,
        vars: VariableMap,
        files: &'a FileContents,
    },
}

impl<'a> Dispatch<'a> {
    /// Gather the inputs of `kind` for `path`.
    ///
    /// # Errors
    ///
    /// [`ExtractError::FileNotLoaded`] when a text-based format has no content.
    pub fn prepare(
        kind: FileKind,
        path: &str,
        files: &'a FileContents,
        store: &VariableRegistry,
    ) -> Result<Self> {
        let content = || {
            files
                .get(path)
                .and_then(Option::as_deref)
                .ok_or_else(|| ExtractError::FileNotLoaded {
                    path: path.to_string(),
                })
        };
        let visible = || store.get(&dirname(&to_absolute_path(path)));

        Ok(match kind {
            FileKind::Properties => Self::Properties { content: content()? },
            FileKind::VersionCatalog => Self::VersionCatalog { content: content()? },
            FileKind::ConsistentVersions => Self::ConsistentVersions { files },
            FileKind::KotlinSource => Self::KotlinSource {
                content: content()?,
                vars: visible(),
            },
            FileKind::GradleScript => Self::GradleScript {
                content: content()?,
                vars: visible(),
                files,
            },
        })
    }

    /// Directory scope that receives the variables this file declares.
    fn var_scope(&self, path: &str) -> String {
        match self {
            Self::KotlinSource { .. } => ROOT_SCOPE.to_string(),
            _ => dirname(&to_absolute_path(path)),
        }
    }

    fn run<P: BuildFileParser>(&self, parser: &P, path: &str) -> Result<ParseOutput> {
        match self {
            Self::Properties { content } => parser.parse_props(content, path),
            Self::VersionCatalog { content } => parser.parse_catalog(content, path),
            Self::ConsistentVersions { files } => parser.parse_gcv(path, files),
            Self::KotlinSource { content, vars } => parser.parse_kotlin_source(content, vars, path),
            Self::GradleScript {
                content,
                vars,
                files,
            } => parser.parse_gradle(content, vars, path, files),
        }
    }
}

/// Mutable state of one extraction run.
#[derive(Debug)]
pub struct RunState<'r> {
    pub vars: &'r mut VariableRegistry,
    pub registries: &'r mut RegistryCatalog,
    pub deps: &'r mut Vec<PackageDependency>,
}

/// Classify `path`, run its parser and fold the output into `state`.
///
/// Unrecognised files are skipped. Only variables of properties, Kotlin sources and
/// build scripts are kept, and only build scripts contribute registries.
///
/// # Errors
///
/// Whatever preparing or parsing this one file fails with. `state` is left untouched in
/// that case.
pub fn dispatch_file<P: BuildFileParser>(
    parser: &P,
    path: &str,
    files: &FileContents,
    state: &mut RunState<'_>,
) -> Result<()> {
    let Some(kind) = classify(path, files) else {
        trace!(package_file = path, "Skipping unrecognised file");
        return Ok(());
    };
    trace!(package_file = path, ?kind, "Dispatching package file");

    let dispatch = Dispatch::prepare(kind, path, files, state.vars)?;
    let output = dispatch.run(parser, path)?;

    match dispatch {
        Dispatch::Properties { .. } | Dispatch::KotlinSource { .. } => {
            state.vars.update(&dispatch.var_scope(path), output.vars);
        }
        Dispatch::GradleScript { .. } => {
            state.vars.update(&dispatch.var_scope(path), output.vars);
            state.registries.add(output.registries);
        }
        Dispatch::VersionCatalog { .. } | Dispatch::ConsistentVersions { .. } => {}
    }
    state.deps.extend(output.deps);
    Ok(())
}
