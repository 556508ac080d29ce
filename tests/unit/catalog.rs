//! Version catalog parsing.

use gradle_deps::models::DepType;
use gradle_deps::parser::catalog::parse_catalog;

const CATALOG: &str = r#"[versions]
ktor = "2.3.5"
unused = "0.1"

[libraries]
ktor-core = { module = "io.ktor:ktor-server-core", version.ref = "ktor" }
ktor-netty = { group = "io.ktor", name = "ktor-server-netty", version.ref = "ktor" }
logback = "ch.qos.logback:logback-classic:1.4.11"
broken = { module = "org.example:broken", version.ref = "missing" }
bom-managed = { module = "org.example:managed" }

[plugins]
ktor = { id = "io.ktor.plugin", version.ref = "ktor" }
"#;

#[test]
fn shared_version_entries_own_their_dependencies() {
    let deps = parse_catalog(CATALOG, "gradle/libs.versions.toml").unwrap();
    let ktor: Vec<_> = deps.iter().filter(|d| d.shared_variable_name.as_deref() == Some("ktor")).collect();
    assert_eq!(ktor.len(), 3);

    let pos = ktor[0].manager_data.file_replace_position.unwrap();
    assert_eq!(&CATALOG[pos..pos + 5], "2.3.5");
    assert!(ktor.iter().all(|d| d.manager_data.file_replace_position == Some(pos)));
    assert!(ktor.iter().any(|d| d.dep_type == Some(DepType::Plugin)));
}

#[test]
fn unresolvable_and_unversioned_entries_are_skipped() {
    let deps = parse_catalog(CATALOG, "gradle/libs.versions.toml").unwrap();
    let names: Vec<_> = deps.iter().filter_map(|d| d.dep_name.as_deref()).collect();
    assert!(!names.contains(&"org.example:broken"));
    assert!(!names.contains(&"org.example:managed"));

    let logback = deps.iter().find(|d| d.dep_name.as_deref() == Some("ch.qos.logback:logback-classic")).unwrap();
    let pos = logback.manager_data.file_replace_position.unwrap();
    assert_eq!(&CATALOG[pos..pos + 6], "1.4.11");
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(parse_catalog("[versions\n", "libs.versions.toml").is_err());
}
