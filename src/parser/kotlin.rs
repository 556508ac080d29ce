//! Kotlin source (`buildSrc/**/*.kt`) parsing.
//!
//! Projects often keep versions as constants in `buildSrc`:
//!
//! ```kotlin
//! object Versions {
//!     const val kotlin = "1.9.20"
//! }
//!
//! object Deps {
//!     const val stdlib = "org.jetbrains.kotlin:kotlin-stdlib:${Versions.kotlin}"
//! }
//! ```
//!
//! Plain string constants become variables, keyed both by their name qualified with the
//! enclosing `object`s (`Versions.kotlin`) and by the bare name. String literals in
//! coordinate notation become dependencies. References to constants that are not known
//! yet are skipped; the orchestrator runs Kotlin sources twice so that constants declared
//! in a later file are visible the second time round.

use regex::Regex;
use std::sync::LazyLock;

use super::ParseOutput;
use super::common::{dependency_from_literal, lines_with_offsets, mask_comments, string_literals, variable};
use crate::models::VariableMap;

static OBJECT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:companion\s+)?object\s+(?P<name>\w+)").expect("valid regex")
});

static VAL_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:(?:private|internal|public|const)\s+)*val\s+(?P<name>\w+)\s*(?::\s*String\s*)?=\s*"(?P<value>[^"$\\]*)"\s*;?\s*$"#,
    )
    .expect("valid regex")
});

/// An `object` whose body is open at `depth`.
struct Scope {
    name: String,
    depth: usize,
}

fn qualified(scopes: &[Scope], name: &str) -> String {
    scopes
        .iter()
        .map(|scope| scope.name.as_str())
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join(".")
}

/// Variables and dependencies declared in a Kotlin source file. `vars` are the
/// variables visible from the project root.
pub fn parse_kotlin_source(content: &str, vars: &VariableMap, package_file: &str) -> ParseOutput {
    let masked = mask_comments(content);
    let mut out = ParseOutput::default();
    let mut visible = vars.clone();
    let mut scopes: Vec<Scope> = Vec::new();
    let mut depth = 0usize;

    for (line_offset, line) in lines_with_offsets(&masked) {
        if let Some(caps) = VAL_DECL.captures(line)
            && let (Some(name), Some(value)) = (caps.name("name"), caps.name("value"))
        {
            let key = qualified(&scopes, name.as_str());
            let offset = line_offset + value.start();
            for key in [key.as_str(), name.as_str()] {
                let var = variable(key, value.as_str(), offset, package_file);
                visible.insert(key.to_string(), var.clone());
                out.vars.insert(key.to_string(), var);
            }
        }

        for literal in string_literals(line, line_offset) {
            if let Some(dep) = dependency_from_literal(&literal, &visible, package_file) {
                out.deps.push(dep);
            }
        }

        let mut pending_object = OBJECT_DECL
            .captures(line)
            .and_then(|caps| caps.name("name"))
            .map(|m| m.as_str().to_string());
        let mut quote: Option<char> = None;
        let mut escaped = false;
        for c in line.chars() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '"' | '\'' => quote = Some(c),
                '{' => {
                    depth += 1;
                    if let Some(name) = pending_object.take() {
                        scopes.push(Scope { name, depth });
                    }
                }
                '}' => {
                    if scopes.last().is_some_and(|scope| scope.depth == depth) {
                        scopes.pop();
                    }
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
        }
    }

    out
}
