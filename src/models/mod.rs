//! Shared data models for extraction
//!
//! These types cross every module boundary: parsers create [`PackageDependency`],
//! [`VariableData`] and [`PackageRegistry`] values, the orchestrator threads them through
//! the variable store and registry catalog, and the merger groups dependencies into
//! [`PackageFile`] records. All of them serialize in camelCase so the JSON output lines up
//! with what the rest of the update platform expects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::MAVEN_DATASOURCE;

/// Coarse classification of a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DepType {
    /// Regular build dependency
    Dependencies,
    /// Dependency of build logic (`buildSrc`) rather than of the product
    DevDependencies,
    /// Gradle plugin
    Plugin,
}

/// Extraction details that only this manager interprets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradleManagerData {
    /// File that owns the editable version text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_file: Option<String>,
    /// Byte offset of the version text inside `package_file`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_replace_position: Option<usize>,
}

/// One declared dependency occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDependency {
    /// Name as declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_name: Option<String>,
    /// Normalized `group:artifact`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Version as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_type: Option<DepType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
    /// Candidate registries, unique and ordered. Computed by the merger.
    #[serde(default)]
    pub registry_urls: Vec<String>,
    /// Variable the version was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_variable_name: Option<String>,
    /// Copy of `manager_data.file_replace_position` kept for older consumers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_replace_position: Option<usize>,
    #[serde(default)]
    pub manager_data: GradleManagerData,
}

impl PackageDependency {
    /// A dependency in `group:artifact` notation found in `package_file`.
    ///
    /// `dep_name` and `package_name` both start out as the coordinates; parsers that know
    /// better (plugins) overwrite them.
    pub fn new(coordinates: impl Into<String>, package_file: impl Into<String>) -> Self {
        let coordinates = coordinates.into();
        Self {
            dep_name: Some(coordinates.clone()),
            package_name: Some(coordinates),
            manager_data: GradleManagerData {
                package_file: Some(package_file.into()),
                file_replace_position: None,
            },
            ..Self::default()
        }
    }

    /// Set the version and where it was written.
    #[must_use]
    pub fn with_version(mut self, value: impl Into<String>, position: usize) -> Self {
        self.current_value = Some(value.into());
        self.manager_data.file_replace_position = Some(position);
        self
    }

    /// Take the version from a variable; the variable's file becomes the owner.
    #[must_use]
    pub fn with_variable(mut self, var: &VariableData) -> Self {
        self.current_value = Some(var.value.clone());
        self.shared_variable_name = Some(var.key.clone());
        self.manager_data = GradleManagerData {
            package_file: Some(var.package_file.clone()),
            file_replace_position: Some(var.file_replace_position),
        };
        self
    }

    #[must_use]
    pub fn with_dep_type(mut self, dep_type: DepType) -> Self {
        self.dep_type = Some(dep_type);
        self
    }

    /// Name used to identify the dependency against content descriptors.
    pub fn lookup_name(&self) -> Option<&str> {
        self.package_name.as_deref().or(self.dep_name.as_deref())
    }
}

/// A variable binding discovered in a build file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableData {
    pub key: String,
    pub value: String,
    /// File the binding was declared in
    pub package_file: String,
    /// Byte offset of the value text
    pub file_replace_position: usize,
}

/// Variables by name.
pub type VariableMap = BTreeMap<String, VariableData>;

/// Aggregated result for one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageFile {
    pub package_file: String,
    pub datasource: String,
    pub deps: Vec<PackageDependency>,
}

impl PackageFile {
    /// An empty record with the default datasource.
    pub fn new(package_file: impl Into<String>) -> Self {
        Self {
            package_file: package_file.into(),
            datasource: MAVEN_DATASOURCE.to_string(),
            deps: Vec::new(),
        }
    }
}

/// Whether a registry serves ordinary dependencies or plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistryScope {
    Dep,
    Plugin,
}

/// Exclusive registries suppress every other matching registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistryType {
    #[default]
    Regular,
    Exclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentMode {
    Include,
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentMatcher {
    Exact,
    Regex,
    Subgroup,
}

/// A `content { ... }` rule restricting what a registry serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDescriptorSpec {
    pub mode: ContentMode,
    pub matcher: ContentMatcher,
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    /// Exact version, Gradle range, or pattern when `matcher` is `regex`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ContentDescriptorSpec {
    pub fn new(mode: ContentMode, matcher: ContentMatcher, group_id: impl Into<String>) -> Self {
        Self {
            mode,
            matcher,
            group_id: group_id.into(),
            artifact_id: None,
            version: None,
        }
    }

    #[must_use]
    pub fn with_artifact(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// A package registry declared in a build script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRegistry {
    pub registry_url: String,
    pub scope: RegistryScope,
    #[serde(default)]
    pub registry_type: RegistryType,
    #[serde(default)]
    pub content: Vec<ContentDescriptorSpec>,
}

impl PackageRegistry {
    /// A regular registry with no content rules.
    pub fn new(registry_url: impl Into<String>, scope: RegistryScope) -> Self {
        Self {
            registry_url: registry_url.into(),
            scope,
            registry_type: RegistryType::Regular,
            content: Vec::new(),
        }
    }

    #[must_use]
    pub fn exclusive(mut self) -> Self {
        self.registry_type = RegistryType::Exclusive;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: Vec<ContentDescriptorSpec>) -> Self {
        self.content = content;
        self
    }
}
