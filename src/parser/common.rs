//! Helpers shared by the line-oriented parsers: string literal scanning, dependency
//! coordinates, variable references and comment masking.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{DepType, PackageDependency, VariableData, VariableMap};

static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\\n]|\\.)*)"|'((?:[^'\\\n]|\\.)*)'"#).expect("valid regex")
});

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<group>[\w][\w.\-]*):(?P<artifact>[\w][\w.\-]*)(?::(?P<version>[^:@\s]+))?(?::[\w.\-]+)?(?:@\w+)?$",
    )
    .expect("valid regex")
});

static VARIABLE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$(?:\{\s*(?P<braced>[\w.]+)\s*\}|(?P<bare>[\w.]+))$").expect("valid regex")
});

/// A quoted string literal and the byte offset of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    pub value: &'a str,
    pub offset: usize,
}

/// Single- and double-quoted literals in `text`; `base` is added to every offset.
pub fn string_literals(text: &str, base: usize) -> Vec<Literal<'_>> {
    STRING_LITERAL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| Literal {
            value: m.as_str(),
            offset: base + m.start(),
        })
        .collect()
}

/// `group:artifact[:version[:classifier]][@ext]` split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates<'a> {
    pub group: &'a str,
    pub artifact: &'a str,
    pub version: Option<&'a str>,
    /// Offset of `version` within the parsed text
    pub version_offset: usize,
}

impl Coordinates<'_> {
    pub fn name(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

pub fn parse_coordinates(text: &str) -> Option<Coordinates<'_>> {
    let caps = COORDINATES.captures(text.trim())?;
    let leading = text.len() - text.trim_start().len();
    let version = caps.name("version");
    Some(Coordinates {
        group: caps.name("group")?.as_str(),
        artifact: caps.name("artifact")?.as_str(),
        version: version.map(|m| m.as_str()),
        version_offset: version.map_or(0, |m| leading + m.start()),
    })
}

/// How a written version relates to variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRef<'a> {
    /// Plain version text
    Literal(&'a str),
    /// `$name` or `${name}`
    Variable(&'a str),
    /// Interpolation that cannot be resolved statically
    Unresolvable,
}

pub fn classify_version(raw: &str) -> VersionRef<'_> {
    if let Some(caps) = VARIABLE_REF.captures(raw) {
        let name = caps.name("braced").or_else(|| caps.name("bare"));
        return name.map_or(VersionRef::Unresolvable, |m| VersionRef::Variable(m.as_str()));
    }
    if raw.contains('$') || raw.trim().is_empty() {
        VersionRef::Unresolvable
    } else {
        VersionRef::Literal(raw)
    }
}

const SCOPE_PREFIXES: &[&str] = &[
    "rootProject.ext.",
    "project.ext.",
    "rootProject.",
    "project.",
    "ext.",
    "extra.",
];

/// Look up `key`, also trying it without the usual `project.` / `ext.` qualifiers.
pub fn lookup_var<'v>(vars: &'v VariableMap, key: &str) -> Option<&'v VariableData> {
    if let Some(var) = vars.get(key) {
        return Some(var);
    }
    SCOPE_PREFIXES
        .iter()
        .find_map(|prefix| key.strip_prefix(prefix))
        .and_then(|stripped| lookup_var(vars, stripped))
}

/// Build a dependency for `name` whose version is written as `raw_version` at
/// `version_offset`. Returns `None` when the version cannot be resolved.
pub fn dependency(
    name: &str,
    raw_version: &str,
    version_offset: usize,
    vars: &VariableMap,
    package_file: &str,
) -> Option<PackageDependency> {
    let dep = PackageDependency::new(name, package_file);
    match classify_version(raw_version) {
        VersionRef::Literal(version) => Some(dep.with_version(version, version_offset)),
        VersionRef::Variable(key) => lookup_var(vars, key).map(|var| dep.with_variable(var)),
        VersionRef::Unresolvable => None,
    }
}

/// Dependency for a string literal in coordinate notation.
pub fn dependency_from_literal(
    literal: &Literal<'_>,
    vars: &VariableMap,
    package_file: &str,
) -> Option<PackageDependency> {
    let coords = parse_coordinates(literal.value)?;
    let version = coords.version?;
    dependency(
        &coords.name(),
        version,
        literal.offset + coords.version_offset,
        vars,
        package_file,
    )
}

/// Plugin dependency: the marker artifact `<id>:<id>.gradle.plugin` is what registries
/// actually serve.
pub fn plugin_dependency(
    id: &str,
    raw_version: &str,
    version_offset: usize,
    vars: &VariableMap,
    package_file: &str,
) -> Option<PackageDependency> {
    let mut dep = dependency(id, raw_version, version_offset, vars, package_file)?;
    dep.dep_name = Some(id.to_string());
    dep.package_name = Some(format!("{id}:{id}.gradle.plugin"));
    Some(dep.with_dep_type(DepType::Plugin))
}

pub fn variable(key: &str, value: &str, offset: usize, package_file: &str) -> VariableData {
    VariableData {
        key: key.to_string(),
        value: value.to_string(),
        package_file: package_file.to_string(),
        file_replace_position: offset,
    }
}

/// Replace `//` and `/* */` comments with spaces, keeping every byte offset intact.
pub fn mask_comments(content: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        Str(char),
        Line,
        Block,
    }

    let mut out = String::with_capacity(content.len());
    let mut state = State::Code;
    let mut chars = content.chars().peekable();
    let blank = |out: &mut String, c: char| {
        if c == '\n' {
            out.push('\n');
        } else {
            out.extend(std::iter::repeat_n(' ', c.len_utf8()));
        }
    };

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' | '\'' => {
                    state = State::Str(c);
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    state = State::Line;
                    blank(&mut out, c);
                }
                '/' if chars.peek() == Some(&'*') => {
                    state = State::Block;
                    blank(&mut out, c);
                    if let Some(next) = chars.next() {
                        blank(&mut out, next);
                    }
                }
                _ => out.push(c),
            },
            State::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else if c == quote || c == '\n' {
                    state = State::Code;
                }
            }
            State::Line => {
                if c == '\n' {
                    state = State::Code;
                }
                blank(&mut out, c);
            }
            State::Block => {
                if c == '*' && chars.peek() == Some(&'/') {
                    blank(&mut out, c);
                    if let Some(next) = chars.next() {
                        blank(&mut out, next);
                    }
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
        }
    }
    out
}

/// Lines of `content` with the byte offset each one starts at.
pub fn lines_with_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    content.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        (start, raw.trim_end_matches(['\n', '\r']))
    })
}
