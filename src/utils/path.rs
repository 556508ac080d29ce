//! Path classification and ordering for package files.
//!
//! Package file paths are project-relative strings with `/` separators, the same form the
//! file loader is keyed by. Variable scopes use the absolute form (`/` is the project
//! root) so that walking up the tree always terminates at `/`.

use crate::constants::{GCV_LOCK_FILE_NAME, GCV_LOCK_HEADER, GCV_PROPS_FILE_NAME};
use crate::utils::fs::FileContents;

/// Last path component.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// `gradle.properties` in any directory.
pub fn is_props_file(path: &str) -> bool {
    file_name(path) == "gradle.properties"
}

/// Version catalogs (`libs.versions.toml` and friends).
pub fn is_toml_file(path: &str) -> bool {
    path.ends_with(".toml")
}

/// `versions.props` of the consistent-versions plugin.
pub fn is_gcv_props_file(path: &str) -> bool {
    file_name(path) == GCV_PROPS_FILE_NAME
}

/// Kotlin sources under `buildSrc`, typically version constant objects.
pub fn is_kotlin_source_file(path: &str) -> bool {
    path.ends_with(".kt")
}

/// Groovy or Kotlin DSL build scripts.
pub fn is_gradle_script_file(path: &str) -> bool {
    path.ends_with(".gradle") || path.ends_with(".gradle.kts")
}

/// `build.gradle` / `build.gradle.kts`.
pub fn is_build_file(path: &str) -> bool {
    matches!(file_name(path), "build.gradle" | "build.gradle.kts")
}

/// `settings.gradle` / `settings.gradle.kts`.
pub fn is_settings_file(path: &str) -> bool {
    matches!(file_name(path), "settings.gradle" | "settings.gradle.kts")
}

/// Whether the consistent-versions plugin manages `props_file`.
///
/// The plugin writes a `versions.lock` next to `versions.props`, starting with
/// [`GCV_LOCK_HEADER`]. Only the already loaded contents are consulted.
pub fn uses_gcv(props_file: &str, files: &FileContents) -> bool {
    let lock_file = join(parent_dir(props_file), GCV_LOCK_FILE_NAME);
    files
        .get(&lock_file)
        .and_then(Option::as_deref)
        .is_some_and(|content| content.starts_with(GCV_LOCK_HEADER))
}

/// Project-relative directory of `path` (`""` for the root).
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Absolute form of a project-relative path, with `.` and `..` segments resolved.
pub fn to_absolute_path(path: &str) -> String {
    format!("/{}", normalize(path))
}

/// Directory of an absolute path; the directory of `/` is `/`.
pub fn dirname(abs_path: &str) -> String {
    match abs_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => abs_path[..idx].to_string(),
    }
}

/// Join a project-relative directory and a relative path into a normalized
/// project-relative path.
pub fn join(dir: &str, relative: &str) -> String {
    if dir.is_empty() {
        normalize(relative)
    } else {
        normalize(&format!("{dir}/{relative}"))
    }
}

fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// Processing rank of a file among the files of its own directory.
fn rank_in_dir(path: &str) -> u8 {
    if !is_gradle_script_file(path) {
        0
    } else if is_settings_file(path) {
        1
    } else if is_build_file(path) {
        2
    } else {
        3
    }
}

/// Order non-Kotlin package files so that files likely to be included by others come
/// after the files likely to include them.
///
/// This is a heuristic, not a topological sort: parent directories come before their
/// subdirectories, and inside one directory plain data files (properties, catalogs) come
/// first, then settings and build scripts, and finally other scripts, which are usually
/// `apply from:` targets. Ties are broken by path, so the order is total.
pub fn reorder_files(mut files: Vec<String>) -> Vec<String> {
    files.sort_by(|x, y| {
        let x_dir: Vec<&str> = parent_dir(x).split('/').filter(|s| !s.is_empty()).collect();
        let y_dir: Vec<&str> = parent_dir(y).split('/').filter(|s| !s.is_empty()).collect();
        x_dir
            .cmp(&y_dir)
            .then_with(|| rank_in_dir(x).cmp(&rank_in_dir(y)))
            .then_with(|| x.cmp(y))
    });
    files
}
