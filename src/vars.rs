//! Directory-scoped variable store.
//!
//! Gradle builds share values across files: a `gradle.properties` in the root is visible
//! to every project below it, an `ext` block in `app/build.gradle` only to scripts in
//! `app/`. [`VariableRegistry`] models this as one variable map per absolute directory;
//! lookups merge every scope from `/` down to the queried directory, so the most specific
//! binding of a name wins.
//!
//! The registry only grows. Files are processed in order and a later file sees everything
//! earlier files declared in its own or an ancestor directory.

use std::collections::BTreeMap;

use crate::models::VariableMap;
use crate::utils::path::{dirname, to_absolute_path};

/// Variables keyed by absolute directory.
#[derive(Debug, Default, Clone)]
pub struct VariableRegistry {
    scopes: BTreeMap<String, VariableMap>,
}

/// The scope for variables visible to the whole project.
pub const ROOT_SCOPE: &str = "/";

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables visible from `dir`: the union of all scopes from `/` to `dir`, deeper
    /// bindings shadowing shallower ones.
    pub fn get(&self, dir: &str) -> VariableMap {
        let mut chain = Vec::new();
        let mut current = normalize_dir(dir);
        loop {
            chain.push(current.clone());
            let parent = dirname(&current);
            if parent == current {
                break;
            }
            current = parent;
        }

        let mut vars = VariableMap::new();
        for scope in chain.iter().rev() {
            if let Some(scope_vars) = self.scopes.get(scope) {
                vars.extend(scope_vars.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        vars
    }

    /// Merge `vars` into the scope of `dir`, overwriting names already bound there.
    pub fn update(&mut self, dir: &str, vars: VariableMap) {
        if vars.is_empty() {
            return;
        }
        self.scopes.entry(normalize_dir(dir)).or_default().extend(vars);
    }

    /// Number of directories with at least one binding.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

fn normalize_dir(dir: &str) -> String {
    if dir.starts_with('/') {
        let trimmed = dir.trim_end_matches('/');
        if trimmed.is_empty() { ROOT_SCOPE.to_string() } else { trimmed.to_string() }
    } else {
        to_absolute_path(dir)
    }
}
