//! Version catalog (`libs.versions.toml`) parsing.
//!
//! ```toml
//! [versions]
//! kotlin = "1.9.20"
//!
//! [libraries]
//! guava = "com.google.guava:guava:32.1.2-jre"
//! kotlin-stdlib = { module = "org.jetbrains.kotlin:kotlin-stdlib", version.ref = "kotlin" }
//! okhttp = { group = "com.squareup.okhttp3", name = "okhttp", version = { strictly = "4.12.0" } }
//!
//! [plugins]
//! kotlin-jvm = { id = "org.jetbrains.kotlin.jvm", version.ref = "kotlin" }
//! ```
//!
//! Entries that reference `[versions]` are owned by the version entry: they carry its
//! position and name it as their shared variable. Entries without a version are skipped.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::Range;
use toml::{Spanned, Value};
use tracing::trace;

use super::common::{parse_coordinates, variable};
use crate::core::Result;
use crate::models::{DepType, PackageDependency, VariableData};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VersionCatalog {
    versions: BTreeMap<String, Spanned<Value>>,
    libraries: BTreeMap<String, Spanned<Value>>,
    plugins: BTreeMap<String, Spanned<Value>>,
}

/// Byte offset of the content of the string literal `needle` inside `span`. The span is
/// widened by one byte on each side so it does not matter whether it covers the quotes.
fn locate(content: &str, span: &Range<usize>, needle: &str) -> Option<usize> {
    let start = span.start.saturating_sub(1);
    let end = (span.end + 1).min(content.len());
    let slice = content.get(start..end)?;
    ['"', '\''].iter().find_map(|quote| {
        slice
            .find(&format!("{quote}{needle}{quote}"))
            .map(|idx| start + idx + 1)
    })
}

/// Version text of a `[versions]` entry or an inline `version = ...`.
fn rich_version(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Table(table) => ["strictly", "require", "prefer"]
            .iter()
            .find_map(|key| table.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

struct CatalogParser<'a> {
    content: &'a str,
    package_file: &'a str,
    versions: BTreeMap<String, VariableData>,
}

impl CatalogParser<'_> {
    /// Version of a table entry: literal, rich or `version.ref`.
    fn table_version(
        &self,
        table: &toml::Table,
        span: &Range<usize>,
        name: &str,
    ) -> Option<PackageDependency> {
        let dep = PackageDependency::new(name, self.package_file);
        let version = table.get("version")?;

        if let Some(key) = version.get("ref").and_then(Value::as_str) {
            let Some(var) = self.versions.get(key) else {
                trace!(version_ref = key, "Unknown version reference in catalog");
                return None;
            };
            return Some(dep.with_variable(var));
        }

        let text = rich_version(version)?;
        let position = locate(self.content, span, text)?;
        Some(dep.with_version(text, position))
    }

    fn library(&self, value: &Spanned<Value>) -> Option<PackageDependency> {
        let span = value.span();
        match value.get_ref() {
            Value::String(notation) => {
                let coords = parse_coordinates(notation)?;
                let version = coords.version?;
                let position = locate(self.content, &span, notation)? + coords.version_offset;
                Some(PackageDependency::new(coords.name(), self.package_file).with_version(version, position))
            }
            Value::Table(table) => {
                let name = match (table.get("module"), table.get("group"), table.get("name")) {
                    (Some(module), _, _) => module.as_str()?.to_string(),
                    (None, Some(group), Some(name)) => format!("{}:{}", group.as_str()?, name.as_str()?),
                    _ => return None,
                };
                self.table_version(table, &span, &name)
            }
            _ => None,
        }
    }

    fn plugin(&self, value: &Spanned<Value>) -> Option<PackageDependency> {
        let span = value.span();
        let mut dep = match value.get_ref() {
            Value::String(notation) => {
                let (id, version) = notation.split_once(':')?;
                let position = locate(self.content, &span, notation)? + id.len() + 1;
                PackageDependency::new(id, self.package_file).with_version(version, position)
            }
            Value::Table(table) => {
                let id = table.get("id")?.as_str()?;
                self.table_version(table, &span, id)?
            }
            _ => return None,
        };
        let id = dep.dep_name.clone()?;
        dep.package_name = Some(format!("{id}:{id}.gradle.plugin"));
        Some(dep.with_dep_type(DepType::Plugin))
    }
}

/// Dependencies declared in a version catalog.
///
/// # Errors
///
/// Returns [`crate::core::ExtractError::TomlError`] when the file is not valid TOML.
pub fn parse_catalog(content: &str, package_file: &str) -> Result<Vec<PackageDependency>> {
    let catalog: VersionCatalog = toml::from_str(content)?;

    let mut parser = CatalogParser {
        content,
        package_file,
        versions: BTreeMap::new(),
    };

    for (key, value) in &catalog.versions {
        let span = value.span();
        if let Some(text) = rich_version(value.get_ref())
            && let Some(position) = locate(content, &span, text)
        {
            parser.versions.insert(key.clone(), variable(key, text, position, package_file));
        }
    }

    let mut deps: Vec<PackageDependency> =
        catalog.libraries.values().filter_map(|value| parser.library(value)).collect();
    deps.extend(catalog.plugins.values().filter_map(|value| parser.plugin(value)));
    Ok(deps)
}
