//! Content descriptor matching.
//!
//! Gradle lets a repository declaration restrict what it serves:
//!
//! ```groovy
//! maven {
//!     url "https://repo.example.com"
//!     content {
//!         includeGroupAndSubgroups "com.example"
//!         excludeModule "com.example", "legacy"
//!     }
//! }
//! ```
//!
//! [`matches_content_descriptor`] decides whether a dependency passes such a rule set.
//! Each rule is checked on group, then artifact, then version; a rule hits when all three
//! agree. Include and exclude hits are then combined with the table below.
//!
//! | includes present | excludes present | dependency matches when |
//! |---|---|---|
//! | yes | yes | an include hits and no exclude hits |
//! | yes | no | an include hits |
//! | no | yes | no exclude hits |
//! | no | no | always |

use regex::Regex;
use tracing::warn;

use crate::core::{ExtractError, Result};
use crate::models::{ContentDescriptorSpec, ContentMatcher, ContentMode, PackageDependency};
use crate::version;

/// Unanchored regex search. Invalid patterns never match.
fn regex_test(pattern: &str, input: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(input),
        Err(err) => {
            let err = ExtractError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            };
            warn!("{err}");
            false
        }
    }
}

fn group_matches(spec: &ContentDescriptorSpec, group_id: &str) -> bool {
    match spec.matcher {
        ContentMatcher::Regex => regex_test(&spec.group_id, group_id),
        ContentMatcher::Subgroup => {
            let prefix = spec.group_id.trim_end_matches('.');
            group_id == prefix || format!("{group_id}.").starts_with(&format!("{prefix}."))
        }
        ContentMatcher::Exact => group_id == spec.group_id,
    }
}

fn artifact_matches(spec: &ContentDescriptorSpec, artifact_id: &str) -> bool {
    match (&spec.artifact_id, spec.matcher) {
        (None, _) => true,
        (Some(pattern), ContentMatcher::Regex) => regex_test(pattern, artifact_id),
        (Some(expected), _) => artifact_id == expected,
    }
}

fn version_matches(spec: &ContentDescriptorSpec, current_value: Option<&str>) -> bool {
    match (&spec.version, current_value) {
        (Some(pattern), Some(current)) if spec.matcher == ContentMatcher::Regex => {
            regex_test(pattern, current)
        }
        (Some(expr), Some(current)) => version::matches(current, expr),
        _ => true,
    }
}

/// Whether `dep` passes the content rules of one registry.
///
/// # Errors
///
/// [`ExtractError::UnidentifiableDependency`] when the dependency has neither a package
/// name nor a dependency name to split into group and artifact.
pub fn matches_content_descriptor(
    dep: &PackageDependency,
    content: &[ContentDescriptorSpec],
) -> Result<bool> {
    let name = dep.lookup_name().ok_or(ExtractError::UnidentifiableDependency)?;
    let mut parts = name.split(':');
    let group_id = parts.next().unwrap_or_default();
    let artifact_id = parts.next().unwrap_or_default();

    let mut has_includes = false;
    let mut has_excludes = false;
    let mut matches_include = false;
    let mut matches_exclude = false;

    for spec in content {
        let is_match = group_matches(spec, group_id)
            && artifact_matches(spec, artifact_id)
            && version_matches(spec, dep.current_value.as_deref());

        match spec.mode {
            ContentMode::Include => {
                has_includes = true;
                matches_include |= is_match;
            }
            ContentMode::Exclude => {
                has_excludes = true;
                matches_exclude |= is_match;
            }
        }
    }

    Ok(match (has_includes, has_excludes) {
        (true, true) => matches_include && !matches_exclude,
        (true, false) => matches_include,
        (false, true) => !matches_exclude,
        (false, false) => true,
    })
}
