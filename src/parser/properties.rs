//! `gradle.properties` parsing.

use super::ParseOutput;
use super::common::{dependency, lines_with_offsets, parse_coordinates, variable};

/// Every `key=value` (or `key: value`) entry becomes a variable. Values written in
/// coordinate notation with a literal version also become dependencies.
pub fn parse_props(content: &str, package_file: &str) -> ParseOutput {
    let mut out = ParseOutput::default();

    for (line_offset, line) in lines_with_offsets(content) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let Some(sep) = line.find(['=', ':']) else {
            continue;
        };
        let key = line[..sep].trim();
        if key.is_empty() {
            continue;
        }

        let rest = &line[sep + 1..];
        let value = rest.trim();
        let value_offset = line_offset + sep + 1 + (rest.len() - rest.trim_start().len());

        out.vars.insert(key.to_string(), variable(key, value, value_offset, package_file));

        if let Some(coords) = parse_coordinates(value)
            && let Some(version) = coords.version
            && let Some(dep) = dependency(
                &coords.name(),
                version,
                value_offset + coords.version_offset,
                &out.vars,
                package_file,
            )
        {
            out.deps.push(dep);
        }
    }

    out
}
