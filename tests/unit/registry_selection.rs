//! Registry URL selection: scopes, exclusivity and the plugin portal fallback.

use gradle_deps::constants::GRADLE_PLUGIN_PORTAL_URL;
use gradle_deps::models::{
    ContentDescriptorSpec, ContentMatcher, ContentMode, DepType, PackageDependency, PackageRegistry,
    RegistryScope,
};
use gradle_deps::registry::RegistryCatalog;

fn only(group: &str) -> Vec<ContentDescriptorSpec> {
    vec![ContentDescriptorSpec::new(ContentMode::Include, ContentMatcher::Subgroup, group)]
}

fn catalog() -> RegistryCatalog {
    let mut catalog = RegistryCatalog::new();
    catalog.add([
        PackageRegistry::new("https://repo.maven.apache.org/maven2", RegistryScope::Dep),
        PackageRegistry::new("https://jitpack.io", RegistryScope::Dep)
            .exclusive()
            .with_content(only("com.github")),
        PackageRegistry::new("https://nexus.acme.com/releases", RegistryScope::Dep).with_content(only("com.acme")),
        PackageRegistry::new("https://plugins.acme.com", RegistryScope::Plugin).with_content(only("com.acme")),
    ]);
    catalog
}

#[test]
fn additive_registries_accumulate() {
    let dep = PackageDependency::new("com.acme:core", "build.gradle");
    assert_eq!(
        catalog().registry_urls_for_dep(&dep).unwrap(),
        vec!["https://repo.maven.apache.org/maven2", "https://nexus.acme.com/releases"]
    );
}

#[test]
fn exclusive_registry_suppresses_the_rest() {
    let dep = PackageDependency::new("com.github.user:lib", "build.gradle");
    assert_eq!(catalog().registry_urls_for_dep(&dep).unwrap(), vec!["https://jitpack.io"]);
}

#[test]
fn plugins_only_see_plugin_registries() {
    let acme = PackageDependency::new("com.acme.conventions", "settings.gradle").with_dep_type(DepType::Plugin);
    assert_eq!(catalog().registry_urls_for_dep(&acme).unwrap(), vec!["https://plugins.acme.com"]);

    let other = PackageDependency::new("org.other.plugin", "settings.gradle").with_dep_type(DepType::Plugin);
    assert_eq!(catalog().registry_urls_for_dep(&other).unwrap(), vec![GRADLE_PLUGIN_PORTAL_URL]);
}

#[test]
fn first_declaration_wins() {
    let mut catalog = RegistryCatalog::new();
    catalog.add([PackageRegistry::new("https://r", RegistryScope::Dep).with_content(only("com.acme"))]);
    catalog.add([PackageRegistry::new("https://r", RegistryScope::Dep)]);
    assert_eq!(catalog.len(), 1);

    let dep = PackageDependency::new("org.other:x", "build.gradle");
    assert!(catalog.registry_urls_for_dep(&dep).unwrap().is_empty());
}
