//! Consistent-versions plugin (`versions.props` + `versions.lock`) parsing.
//!
//! `versions.props` pins versions either for exact modules or for globs:
//!
//! ```text
//! com.fasterxml.jackson.*:* = 2.15.2
//! com.google.guava:guava = 32.1.2-jre
//! ```
//!
//! Exact pins become dependencies directly. Glob pins become one dependency per module in
//! `versions.lock` that the glob covers, all sharing the pin's position. When several pins
//! cover a module, an exact pin wins over a glob and a longer glob over a shorter one.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::trace;

use super::common::lines_with_offsets;
use crate::constants::GCV_LOCK_FILE_NAME;
use crate::core::{ExtractError, Result};
use crate::models::PackageDependency;
use crate::utils::fs::FileContents;
use crate::utils::path::{join, parent_dir};

static PROPS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<coords>[\w.\-*]+:[\w.\-*]+)\s*=\s*(?P<version>[^\s#]+)").expect("valid regex")
});

static LOCK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<group>[\w.\-]+):(?P<artifact>[\w.\-]+):(?P<version>\S+)").expect("valid regex")
});

struct Pin<'a> {
    coords: &'a str,
    version: &'a str,
    position: usize,
}

fn glob_regex(glob: &str) -> Option<Regex> {
    let pattern = regex::escape(glob).replace(r"\*", ".*");
    Regex::new(&format!("^{pattern}$")).ok()
}

/// Locked module names (`group:artifact`) in file order.
fn locked_modules(lock: &str) -> Vec<String> {
    lock.lines()
        .filter_map(|line| LOCK_LINE.captures(line))
        .map(|caps| format!("{}:{}", &caps["group"], &caps["artifact"]))
        .collect()
}

/// Dependencies pinned in `package_file` (a `versions.props`).
///
/// # Errors
///
/// [`ExtractError::FileNotLoaded`] when the props file itself is missing from `files`.
pub fn parse_gcv(package_file: &str, files: &FileContents) -> Result<Vec<PackageDependency>> {
    let content = files
        .get(package_file)
        .and_then(Option::as_deref)
        .ok_or_else(|| ExtractError::FileNotLoaded {
            path: package_file.to_string(),
        })?;

    let lock_file = join(parent_dir(package_file), GCV_LOCK_FILE_NAME);
    let locked = files
        .get(&lock_file)
        .and_then(Option::as_deref)
        .map(locked_modules)
        .unwrap_or_default();

    let mut exact = Vec::new();
    let mut globs = Vec::new();
    for (line_offset, line) in lines_with_offsets(content) {
        let Some(caps) = PROPS_LINE.captures(line) else {
            continue;
        };
        let (Some(coords), Some(version)) = (caps.name("coords"), caps.name("version")) else {
            continue;
        };
        let pin = Pin {
            coords: coords.as_str(),
            version: version.as_str(),
            position: line_offset + version.start(),
        };
        if pin.coords.contains('*') {
            globs.push(pin);
        } else {
            exact.push(pin);
        }
    }

    let mut claimed: HashSet<String> = HashSet::new();
    let mut deps = Vec::new();

    for pin in &exact {
        claimed.insert(pin.coords.to_string());
        deps.push(PackageDependency::new(pin.coords, package_file).with_version(pin.version, pin.position));
    }

    globs.sort_by_key(|pin| std::cmp::Reverse(pin.coords.len()));
    for pin in &globs {
        let Some(re) = glob_regex(pin.coords) else {
            continue;
        };
        for module in locked.iter().filter(|m| re.is_match(m)) {
            if !claimed.insert(module.clone()) {
                continue;
            }
            let mut dep = PackageDependency::new(module.as_str(), package_file)
                .with_version(pin.version, pin.position);
            dep.shared_variable_name = Some(pin.coords.to_string());
            deps.push(dep);
        }
    }

    trace!(package_file, "Found {} pinned dependencies", deps.len());
    Ok(deps)
}
