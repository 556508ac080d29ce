//! Package registry catalog.
//!
//! Build scripts declare repositories (`mavenCentral()`, `maven { url ... }`, plugin
//! repositories inside `pluginManagement`). The [`RegistryCatalog`] accumulates them for
//! one extraction run and later answers, per dependency, which registry URLs may serve it.
//!
//! Entries are unique by `(registry_url, scope)`. Declaring the same repository again in
//! another script is a no-op, even if its content rules differ; the first declaration
//! wins.

pub mod content;

use tracing::trace;

use crate::constants::GRADLE_PLUGIN_PORTAL_URL;
use crate::core::Result;
use crate::models::{DepType, PackageDependency, PackageRegistry, RegistryScope, RegistryType};

pub use content::matches_content_descriptor;

/// Ordered set of declared registries.
#[derive(Debug, Clone)]
pub struct RegistryCatalog {
    registries: Vec<PackageRegistry>,
    plugin_portal_url: String,
}

impl Default for RegistryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryCatalog {
    pub fn new() -> Self {
        Self::with_plugin_portal(GRADLE_PLUGIN_PORTAL_URL)
    }

    /// A catalog whose plugin fallback is `plugin_portal_url` instead of the public portal.
    pub fn with_plugin_portal(plugin_portal_url: impl Into<String>) -> Self {
        Self {
            registries: Vec::new(),
            plugin_portal_url: plugin_portal_url.into(),
        }
    }

    /// Append every entry whose `(registry_url, scope)` is not known yet.
    pub fn add(&mut self, entries: impl IntoIterator<Item = PackageRegistry>) {
        for entry in entries {
            let known = self
                .registries
                .iter()
                .any(|r| r.registry_url == entry.registry_url && r.scope == entry.scope);
            if known {
                trace!(registry_url = %entry.registry_url, "Registry already known");
            } else {
                self.registries.push(entry);
            }
        }
    }

    pub fn registries(&self) -> &[PackageRegistry] {
        &self.registries
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Registry URLs that may serve `dep`.
    ///
    /// Plugins are matched against plugin-scoped registries, everything else against
    /// dependency-scoped ones. When an exclusive registry matches, only exclusive
    /// registries are returned. A plugin that matches nothing falls back to the plugin
    /// portal.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::core::ExtractError::UnidentifiableDependency`] from the matcher.
    pub fn registry_urls_for_dep(&self, dep: &PackageDependency) -> Result<Vec<String>> {
        let scope = if dep.dep_type == Some(DepType::Plugin) {
            RegistryScope::Plugin
        } else {
            RegistryScope::Dep
        };

        let mut matching = Vec::new();
        for registry in self.registries.iter().filter(|r| r.scope == scope) {
            if matches_content_descriptor(dep, &registry.content)? {
                matching.push(registry);
            }
        }

        let has_exclusive = matching.iter().any(|r| r.registry_type == RegistryType::Exclusive);
        let mut urls: Vec<String> = Vec::new();
        for registry in matching {
            if has_exclusive && registry.registry_type != RegistryType::Exclusive {
                continue;
            }
            if !urls.contains(&registry.registry_url) {
                urls.push(registry.registry_url.clone());
            }
        }

        if urls.is_empty() && scope == RegistryScope::Plugin {
            urls.push(self.plugin_portal_url.clone());
        }

        Ok(urls)
    }
}
