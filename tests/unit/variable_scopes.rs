//! Directory-scoped variable visibility.

use gradle_deps::models::{VariableData, VariableMap};
use gradle_deps::vars::{ROOT_SCOPE, VariableRegistry};

fn vars(entries: &[(&str, &str)], package_file: &str) -> VariableMap {
    entries
        .iter()
        .map(|(key, value)| {
            (
                (*key).to_string(),
                VariableData {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                    package_file: package_file.to_string(),
                    file_replace_position: 0,
                },
            )
        })
        .collect()
}

#[test]
fn nested_scopes_shadow_and_siblings_stay_isolated() {
    let mut registry = VariableRegistry::new();
    registry.update(ROOT_SCOPE, vars(&[("kotlin", "1.9.0"), ("junit", "4.13.2")], "gradle.properties"));
    registry.update("/app", vars(&[("kotlin", "1.9.20")], "app/gradle.properties"));
    registry.update("/lib", vars(&[("okhttp", "4.12.0")], "lib/build.gradle"));

    let app = registry.get("/app/src");
    assert_eq!(app["kotlin"].value, "1.9.20");
    assert_eq!(app["kotlin"].package_file, "app/gradle.properties");
    assert_eq!(app["junit"].value, "4.13.2");
    assert!(!app.contains_key("okhttp"));

    let root = registry.get(ROOT_SCOPE);
    assert_eq!(root["kotlin"].value, "1.9.0");
    assert_eq!(registry.scope_count(), 3);
}

#[test]
fn unknown_directory_sees_only_ancestors() {
    let mut registry = VariableRegistry::new();
    registry.update("/a/b", vars(&[("x", "1")], "a/b/build.gradle"));
    assert!(registry.get("/a").is_empty());
    assert!(registry.get("/c").is_empty());
}
