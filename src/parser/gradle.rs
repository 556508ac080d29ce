//! Groovy and Kotlin DSL build script parsing.
//!
//! Scripts are scanned as a sequence of statements. The masked text (comments blanked) is
//! split at `{`, `}`, `;` and at line ends outside brackets and string literals. A stack of
//! open blocks gives every statement its context, so `maven { url ... }` inside
//! `pluginManagement { repositories { ... } }` is known to declare a plugin registry and
//! `includeGroup "x"` inside its `content { }` to restrict that registry.
//!
//! Recognised shapes:
//!
//! - dependencies in string notation (`"group:artifact:version"`) anywhere, and in map
//!   notation (`group: 'g', name: 'a', version: 'v'` or `group = "g", ...`)
//! - plugins inside `plugins { }`: `id 'x' version 'v'`, `id("x") version "v"`,
//!   `kotlin("jvm") version "v"`
//! - variables: `def`/`val`/`var` declarations, `ext.x = ...`, `ext { x = ... }`,
//!   `extra["x"] = ...`, `set("x", ...)`, `val x by extra(...)`, and Groovy or Kotlin maps
//!   (`ext.versions = [kotlin: '1.9.20']` binds `versions.kotlin`)
//! - registries inside `repositories { }`: `mavenCentral()`, `google()`, `jcenter()`,
//!   `gradlePluginPortal()` and `maven` with its URL, `content { }` rules and
//!   `exclusiveContent { }` wrappers
//! - `apply from:` includes, parsed recursively with the including script's variables

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, trace};

use super::ParseOutput;
use super::common::{
    dependency, dependency_from_literal, lookup_var, mask_comments, plugin_dependency,
    string_literals, variable,
};
use crate::constants::{GOOGLE_MAVEN_URL, GRADLE_PLUGIN_PORTAL_URL, JCENTER_URL, MAVEN_CENTRAL_URL};
use crate::core::{ExtractError, Result};
use crate::models::{
    ContentDescriptorSpec, ContentMatcher, ContentMode, PackageDependency, PackageRegistry,
    RegistryScope, VariableMap,
};
use crate::utils::fs::FileContents;
use crate::utils::path::{join, parent_dir};

static PLUGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:id\s*\(?\s*["'](?P<id>[^"']+)["']\s*\)?|kotlin\s*\(\s*["'](?P<kotlin>[^"']+)["']\s*\))\s*version\s*\(?\s*(?:["'](?P<version>[^"']*)["']|(?P<ident>[A-Za-z_][\w.]*))"#,
    )
    .expect("valid regex")
});

static REGISTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<kind>mavenCentral|mavenLocal|google|jcenter|gradlePluginPortal|maven)\s*(?:\((?P<args>.*)\))?$")
        .expect("valid regex")
});

static REGISTRY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:url|setUrl)\b\s*=?\s*\(?\s*(?:(?:new\s+)?(?:java\.net\.)?(?:uri|URI)\s*\(\s*)?["'](?P<url>[^"']+)["']"#,
    )
    .expect("valid regex")
});

static CONTENT_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<mode>include|exclude)(?P<kind>GroupAndSubgroups|GroupByRegex|Group|ModuleByRegex|Module|VersionByRegex|Version)\b",
    )
    .expect("valid regex")
});

static EXT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:rootProject|project|allprojects|subprojects)\.)?(?:ext|extra(?:\.apply)?)$")
        .expect("valid regex")
});

static LOCAL_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:(?:final|private|def|val|var|String)\s+)+(?P<name>\w+)\s*(?::\s*String\s*)?=\s*(?P<rhs>.+)$")
        .expect("valid regex")
});

static EXT_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:(?:rootProject|project)\.)?(?:ext|extra)\.(?P<name>[\w.]+)\s*=\s*(?P<rhs>.+)$")
        .expect("valid regex")
});

static EXT_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)^(?:(?:rootProject|project)\.)?(?:ext|extra)\s*\[\s*["'](?P<name>[\w.]+)["']\s*\]\s*=\s*(?P<rhs>.+)$"#,
    )
    .expect("valid regex")
});

static EXT_SET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)^(?P<qualifier>(?:(?:rootProject|project)\.)?(?:ext|extra)\.)?set\s*\(\s*["'](?P<name>[\w.]+)["']\s*,\s*(?P<rhs>.+)\)$"#,
    )
    .expect("valid regex")
});

static BY_EXTRA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^val\s+(?P<name>\w+)\s*(?::\s*String\s*)?by\s+(?:rootProject\.)?extra\s*\(\s*(?P<rhs>.+)\)$")
        .expect("valid regex")
});

static BLOCK_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<name>\w+)\s*=\s*(?P<rhs>.+)$").expect("valid regex")
});

static STRING_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"(?P<dq>[^"$\\]*)"|'(?P<sq>[^'$\\]*)')$"#).expect("valid regex")
});

static MAP_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:["']?(?P<key>[\w.\-]+)["']?\s*:|["'](?P<pair>[\w.\-]+)["']\s+to)\s*(?:"(?P<dq>[^"$\\]*)"|'(?P<sq>[^'$\\]*)')"#,
    )
    .expect("valid regex")
});

static MAP_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(?P<key>group|name|version)\s*[:=]\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<ident>[A-Za-z_][\w.]*))"#,
    )
    .expect("valid regex")
});

static APPLY_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)^apply\s*\(?\s*from\s*[:=]\s*(?P<wrap>(?:rootProject\.|project\.)?file\s*\(\s*)?["'](?P<path>[^"']+)["']"#,
    )
    .expect("valid regex")
});

static INTERPOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\s*(?P<braced>[\w.]+)\s*\}|\$(?P<bare>[\w.]+)").expect("valid regex")
});

const ROOT_DIR_PREFIXES: &[&str] = &[
    "$rootDir/",
    "${rootDir}/",
    "${project.rootDir}/",
    "$rootProject.projectDir/",
    "${rootProject.projectDir}/",
    "${rootProject.rootDir}/",
];

const PROJECT_DIR_PREFIXES: &[&str] = &["$projectDir/", "${projectDir}/", "${project.projectDir}/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Open,
    Close,
    End,
}

/// Statement text between two terminators.
#[derive(Debug)]
struct Segment<'a> {
    offset: usize,
    text: &'a str,
    end: Terminator,
}

fn segments(content: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let mut nesting = 0usize;

    for (idx, &b) in content.as_bytes().iter().enumerate() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q || b == b'\n' {
                quote = None;
            }
            continue;
        }
        let end = match b {
            b'"' | b'\'' => {
                quote = Some(b);
                None
            }
            b'(' | b'[' => {
                nesting += 1;
                None
            }
            b')' | b']' => {
                nesting = nesting.saturating_sub(1);
                None
            }
            b'{' => Some(Terminator::Open),
            b'}' => Some(Terminator::Close),
            b';' => Some(Terminator::End),
            b'\n' if nesting == 0 => Some(Terminator::End),
            _ => None,
        };
        if let Some(end) = end {
            out.push(Segment {
                offset: start,
                text: &content[start..idx],
                end,
            });
            start = idx + 1;
            nesting = 0;
        }
    }
    out.push(Segment {
        offset: start,
        text: &content[start..],
        end: Terminator::End,
    });
    out
}

/// Replace `$x` / `${x}` with variable values; `None` if any of them is unknown.
fn interpolate(raw: &str, vars: &VariableMap) -> Option<String> {
    let mut result = String::with_capacity(raw.len());
    let mut last = 0;
    for caps in INTERPOLATION.captures_iter(raw) {
        let whole = caps.get(0)?;
        let key = caps.name("braced").or_else(|| caps.name("bare"))?.as_str();
        let var = lookup_var(vars, key)?;
        result.push_str(&raw[last..whole.start()]);
        result.push_str(&var.value);
        last = whole.end();
    }
    result.push_str(&raw[last..]);
    Some(result)
}

/// Undo string escapes in a literal's content.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(next) = chars.next()
        {
            out.push(next);
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Default)]
struct PendingRegistry {
    url: Option<String>,
    content: Vec<ContentDescriptorSpec>,
}

#[derive(Debug, Default)]
struct PendingExclusive {
    registries: Vec<(String, Vec<ContentDescriptorSpec>)>,
    filter: Vec<ContentDescriptorSpec>,
}

#[derive(Debug)]
enum Block {
    Plugins,
    PluginManagement,
    Repositories,
    Registry(PendingRegistry),
    Content,
    ExclusiveContent(PendingExclusive),
    ForRepository,
    Filter,
    Ext,
    Publishing,
    Other,
}

/// Scan state of one script.
struct Script<'a> {
    package_file: &'a str,
    vars: VariableMap,
    out: ParseOutput,
    blocks: Vec<Block>,
}

impl<'a> Script<'a> {
    fn new(package_file: &'a str, vars: &VariableMap) -> Self {
        Self {
            package_file,
            vars: vars.clone(),
            out: ParseOutput::default(),
            blocks: Vec::new(),
        }
    }

    fn scope(&self) -> RegistryScope {
        if self.blocks.iter().any(|b| matches!(b, Block::PluginManagement)) {
            RegistryScope::Plugin
        } else {
            RegistryScope::Dep
        }
    }

    fn accepts_registries(&self) -> bool {
        matches!(self.blocks.last(), Some(Block::Repositories | Block::ForRepository))
            && !self.blocks.iter().any(|b| matches!(b, Block::Publishing))
    }

    fn define(&mut self, key: &str, value: &str, offset: usize) {
        let var = variable(key, value, offset, self.package_file);
        self.vars.insert(key.to_string(), var.clone());
        self.out.vars.insert(key.to_string(), var);
    }

    fn absorb(&mut self, child: ParseOutput) {
        self.vars.extend(child.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.out.vars.extend(child.vars);
        self.out.deps.extend(child.deps);
        self.out.registries.extend(child.registries);
    }

    fn open_block(&self, header: &str) -> Block {
        let top = self.blocks.last();
        match header {
            "plugins" => Block::Plugins,
            "pluginManagement" => Block::PluginManagement,
            "repositories" => Block::Repositories,
            "publishing" => Block::Publishing,
            "content" | "mavenContent" if matches!(top, Some(Block::Registry(_))) => Block::Content,
            "exclusiveContent" if matches!(top, Some(Block::Repositories)) => {
                Block::ExclusiveContent(PendingExclusive::default())
            }
            "forRepository" if matches!(top, Some(Block::ExclusiveContent(_))) => Block::ForRepository,
            "filter" if matches!(top, Some(Block::ExclusiveContent(_))) => Block::Filter,
            _ if EXT_BLOCK.is_match(header) => Block::Ext,
            _ => match self.registry_declaration(header) {
                Some(url) if self.accepts_registries() => Block::Registry(PendingRegistry {
                    url,
                    content: Vec::new(),
                }),
                _ => Block::Other,
            },
        }
    }

    fn close_block(&mut self) -> Result<()> {
        let block = self
            .blocks
            .pop()
            .ok_or_else(|| ExtractError::parse(self.package_file, "unbalanced closing brace"))?;

        match block {
            Block::Registry(PendingRegistry { url: Some(url), content }) => self.add_registry(url, content),
            Block::ExclusiveContent(exclusive) => {
                let scope = self.scope();
                for (url, mut content) in exclusive.registries {
                    content.extend(exclusive.filter.iter().cloned());
                    trace!(registry_url = %url, "Found exclusive registry");
                    self.out
                        .registries
                        .push(PackageRegistry::new(url, scope).exclusive().with_content(content));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn add_registry(&mut self, url: String, content: Vec<ContentDescriptorSpec>) {
        let scope = self.scope();
        if let Some(Block::ExclusiveContent(exclusive)) =
            self.blocks.iter_mut().rev().find(|b| matches!(b, Block::ExclusiveContent(_)))
        {
            exclusive.registries.push((url, content));
        } else {
            trace!(registry_url = %url, ?scope, "Found registry");
            self.out.registries.push(PackageRegistry::new(url, scope).with_content(content));
        }
    }

    /// URL declared by a repository shorthand or `maven(...)` call. `Some(None)` for
    /// declarations without a usable URL.
    fn registry_declaration(&self, text: &str) -> Option<Option<String>> {
        let caps = REGISTRY.captures(text)?;
        let url = match &caps["kind"] {
            "mavenCentral" => Some(MAVEN_CENTRAL_URL.to_string()),
            "google" => Some(GOOGLE_MAVEN_URL.to_string()),
            "jcenter" => Some(JCENTER_URL.to_string()),
            "gradlePluginPortal" => Some(GRADLE_PLUGIN_PORTAL_URL.to_string()),
            "maven" => caps
                .name("args")
                .and_then(|args| string_literals(args.as_str(), 0).into_iter().next())
                .and_then(|literal| interpolate(literal.value, &self.vars)),
            _ => None,
        };
        Some(url)
    }

    fn registry_url(&mut self, text: &str) {
        let Some(raw) = REGISTRY_URL.captures(text).and_then(|caps| caps.name("url")) else {
            return;
        };
        let Some(url) = interpolate(raw.as_str(), &self.vars) else {
            trace!(url = raw.as_str(), "Skipping registry with unresolvable URL");
            return;
        };
        if let Some(Block::Registry(pending)) = self.blocks.last_mut() {
            pending.url = Some(url);
        }
    }

    fn content_rule(&mut self, text: &str) {
        let Some(caps) = CONTENT_RULE.captures(text) else {
            return;
        };
        let mode = if &caps["mode"] == "include" { ContentMode::Include } else { ContentMode::Exclude };
        let kind = &caps["kind"];
        let matcher = if kind.ends_with("ByRegex") {
            ContentMatcher::Regex
        } else if kind == "GroupAndSubgroups" {
            ContentMatcher::Subgroup
        } else {
            ContentMatcher::Exact
        };
        let rest = caps.get(0).map_or("", |m| &text[m.end()..]);
        let args: Vec<String> = string_literals(rest, 0).iter().map(|l| unescape(l.value)).collect();

        let spec = match (kind.trim_end_matches("ByRegex"), args.as_slice()) {
            ("Group" | "GroupAndSubgroups", [group, ..]) => ContentDescriptorSpec::new(mode, matcher, group),
            ("Module", [group, artifact, ..]) => {
                ContentDescriptorSpec::new(mode, matcher, group).with_artifact(artifact)
            }
            ("Version", [group, artifact, version, ..]) => ContentDescriptorSpec::new(mode, matcher, group)
                .with_artifact(artifact)
                .with_version(version),
            _ => {
                trace!(rule = text, "Skipping content rule with unexpected arguments");
                return;
            }
        };

        match self.blocks.last() {
            Some(Block::Filter) => {
                if let Some(Block::ExclusiveContent(exclusive)) =
                    self.blocks.iter_mut().rev().find(|b| matches!(b, Block::ExclusiveContent(_)))
                {
                    exclusive.filter.push(spec);
                }
            }
            _ => {
                if let Some(Block::Registry(pending)) =
                    self.blocks.iter_mut().rev().find(|b| matches!(b, Block::Registry(_)))
                {
                    pending.content.push(spec);
                }
            }
        }
    }

    fn plugin(&mut self, text: &str, offset: usize) {
        let Some(caps) = PLUGIN.captures(text) else {
            return;
        };
        let id = match (caps.name("id"), caps.name("kotlin")) {
            (Some(id), _) => id.as_str().to_string(),
            (None, Some(kotlin)) => format!("org.jetbrains.kotlin.{}", kotlin.as_str()),
            (None, None) => return,
        };
        let dep = match (caps.name("version"), caps.name("ident")) {
            (Some(version), _) => plugin_dependency(
                &id,
                version.as_str(),
                offset + version.start(),
                &self.vars,
                self.package_file,
            ),
            (None, Some(ident)) => {
                plugin_dependency(&id, &format!("${{{}}}", ident.as_str()), 0, &self.vars, self.package_file)
            }
            (None, None) => None,
        };
        if let Some(dep) = dep {
            self.out.deps.push(dep);
        }
    }

    fn assign(&mut self, name: &str, rhs: &str, rhs_offset: usize) {
        let lead = rhs.len() - rhs.trim_start().len();
        let value = rhs.trim();
        let base = rhs_offset + lead;

        if let Some(caps) = STRING_VALUE.captures(value) {
            if let Some(m) = caps.name("dq").or_else(|| caps.name("sq")) {
                self.define(name, m.as_str(), base + m.start());
            }
        } else if value.starts_with('[') || value.starts_with("mapOf(") {
            let entries: Vec<(String, &str, usize)> = MAP_ENTRY
                .captures_iter(value)
                .filter_map(|caps| {
                    let key = caps.name("key").or_else(|| caps.name("pair"))?;
                    let m = caps.name("dq").or_else(|| caps.name("sq"))?;
                    Some((format!("{name}.{}", key.as_str()), m.as_str(), base + m.start()))
                })
                .collect();
            for (key, value, offset) in entries {
                self.define(&key, value, offset);
            }
        }
    }

    fn variables(&mut self, text: &str, offset: usize) {
        let in_ext = matches!(self.blocks.last(), Some(Block::Ext));
        let found = [&*BY_EXTRA, &*EXT_INDEX, &*EXT_ASSIGN, &*LOCAL_DECL]
            .into_iter()
            .find_map(|re| re.captures(text))
            .or_else(|| {
                EXT_SET
                    .captures(text)
                    .filter(|caps| in_ext || caps.name("qualifier").is_some())
            })
            .or_else(|| in_ext.then(|| BLOCK_ASSIGN.captures(text)).flatten());

        if let Some(caps) = found
            && let (Some(name), Some(rhs)) = (caps.name("name"), caps.name("rhs"))
        {
            self.assign(name.as_str(), rhs.as_str(), offset + rhs.start());
        }
    }

    /// Map-notation dependency: group and name literal, version literal or identifier.
    fn map_notation(&self, text: &str, offset: usize) -> Option<PackageDependency> {
        let mut group = None;
        let mut name = None;
        let mut version = None;
        for caps in MAP_FIELD.captures_iter(text) {
            let value = caps.name("dq").or_else(|| caps.name("sq"));
            match &caps["key"] {
                "group" => group = value.map(|m| m.as_str()),
                "name" => name = value.map(|m| m.as_str()),
                _ => {
                    version = match (value, caps.name("ident")) {
                        (Some(m), _) => Some((m.as_str().to_string(), offset + m.start())),
                        (None, Some(ident)) => Some((format!("${{{}}}", ident.as_str()), 0)),
                        (None, None) => None,
                    }
                }
            }
        }
        let (group, name, (raw_version, version_offset)) = (group?, name?, version?);
        if group.contains('$') || name.contains('$') {
            return None;
        }
        dependency(
            &format!("{group}:{name}"),
            &raw_version,
            version_offset,
            &self.vars,
            self.package_file,
        )
    }

    fn dependencies(&mut self, text: &str, offset: usize) {
        if let Some(dep) = self.map_notation(text, offset) {
            self.out.deps.push(dep);
            return;
        }
        for literal in string_literals(text, offset) {
            if let Some(dep) = dependency_from_literal(&literal, &self.vars, self.package_file) {
                self.out.deps.push(dep);
            }
        }
    }

    /// Project-relative path of an `apply from:` target, if it can be resolved locally.
    fn apply_target(&self, raw: &str, wrap: Option<&str>) -> Option<String> {
        if raw.contains("://") {
            trace!(include = raw, "Skipping remote script");
            return None;
        }
        if let Some(rest) = ROOT_DIR_PREFIXES.iter().find_map(|p| raw.strip_prefix(p)) {
            return Some(join("", rest));
        }
        let dir = parent_dir(self.package_file);
        if let Some(rest) = PROJECT_DIR_PREFIXES.iter().find_map(|p| raw.strip_prefix(p)) {
            return Some(join(dir, rest));
        }
        if raw.contains('$') {
            trace!(include = raw, "Skipping script with unresolvable path");
            return None;
        }
        if wrap.is_some_and(|w| w.starts_with("rootProject")) {
            Some(join("", raw))
        } else {
            Some(join(dir, raw))
        }
    }

    /// Handle one statement. Returns the script to include for `apply from:`.
    fn statement(&mut self, text: &str, offset: usize) -> Option<String> {
        match self.blocks.last() {
            Some(Block::Content | Block::Filter) => {
                self.content_rule(text);
                return None;
            }
            Some(Block::Plugins) => {
                self.plugin(text, offset);
                return None;
            }
            Some(Block::Registry(_)) => {
                self.registry_url(text);
                return None;
            }
            Some(Block::Repositories | Block::ForRepository) if self.accepts_registries() => {
                if let Some(url) = self.registry_declaration(text) {
                    if let Some(url) = url {
                        self.add_registry(url, Vec::new());
                    }
                    return None;
                }
            }
            _ => {}
        }

        if let Some(caps) = APPLY_FROM.captures(text) {
            let raw = caps.name("path").map_or("", |m| m.as_str());
            return self.apply_target(raw, caps.name("wrap").map(|m| m.as_str()));
        }

        self.variables(text, offset);
        self.dependencies(text, offset);
        None
    }
}

/// Parses one build script and the scripts it applies.
#[derive(Debug, Clone, Copy)]
pub struct GradleScriptParser<'a> {
    files: &'a FileContents,
    max_depth: usize,
}

impl<'a> GradleScriptParser<'a> {
    /// `files` resolves `apply from:` targets; includes nest at most `max_depth` deep.
    pub fn new(files: &'a FileContents, max_depth: usize) -> Self {
        Self { files, max_depth }
    }

    /// Parse `content`, the text of `package_file`, with `vars` visible.
    ///
    /// Dependencies found in applied scripts are owned by those scripts, and their
    /// variables become visible to the rest of the including script.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ParseError`] when the script closes more blocks than it opens.
    /// Problems in applied scripts are logged and the include is skipped.
    pub fn parse(&self, content: &str, vars: &VariableMap, package_file: &str) -> Result<ParseOutput> {
        let mut visited = HashSet::from([package_file.to_string()]);
        self.parse_script(content, vars, package_file, 0, &mut visited)
    }

    fn parse_script(
        &self,
        content: &str,
        vars: &VariableMap,
        package_file: &str,
        depth: usize,
        visited: &mut HashSet<String>,
    ) -> Result<ParseOutput> {
        let masked = mask_comments(content);
        let mut script = Script::new(package_file, vars);

        for segment in segments(&masked) {
            let lead = segment.text.len() - segment.text.trim_start().len();
            let text = segment.text.trim();
            let offset = segment.offset + lead;

            match segment.end {
                Terminator::Open => {
                    if !matches!(script.blocks.last(), Some(Block::Plugins)) {
                        script.dependencies(text, offset);
                    }
                    let block = script.open_block(text);
                    script.blocks.push(block);
                }
                Terminator::Close | Terminator::End => {
                    if !text.is_empty()
                        && let Some(target) = script.statement(text, offset)
                    {
                        self.include(&mut script, &target, depth, visited);
                    }
                    if segment.end == Terminator::Close {
                        script.close_block()?;
                    }
                }
            }
        }

        if !script.blocks.is_empty() {
            trace!(package_file, open = script.blocks.len(), "Script ends with unclosed blocks");
        }
        trace!(
            package_file,
            deps = script.out.deps.len(),
            vars = script.out.vars.len(),
            registries = script.out.registries.len(),
            "Parsed build script"
        );
        Ok(script.out)
    }

    fn include(&self, script: &mut Script<'_>, target: &str, depth: usize, visited: &mut HashSet<String>) {
        if depth >= self.max_depth {
            debug!(package_file = script.package_file, include = target, "Skipping include: nesting too deep");
            return;
        }
        if !visited.insert(target.to_string()) {
            debug!(package_file = script.package_file, include = target, "Skipping include: already applied");
            return;
        }
        let Some(Some(content)) = self.files.get(target) else {
            debug!(package_file = script.package_file, include = target, "Skipping include: file not loaded");
            return;
        };
        match self.parse_script(content, &script.vars, target, depth + 1, visited) {
            Ok(child) => script.absorb(child),
            Err(err) => debug!(package_file = script.package_file, include = target, "Skipping include: {err}"),
        }
    }
}
