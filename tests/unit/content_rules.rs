//! Content descriptor decision table and matcher kinds.

use gradle_deps::core::ExtractError;
use gradle_deps::models::{
    ContentDescriptorSpec, ContentMatcher, ContentMode, DepType, PackageDependency,
};
use gradle_deps::registry::matches_content_descriptor;

fn dep(name: &str, version: &str) -> PackageDependency {
    PackageDependency::new(name, "build.gradle").with_version(version, 0)
}

fn include(matcher: ContentMatcher, group: &str) -> ContentDescriptorSpec {
    ContentDescriptorSpec::new(ContentMode::Include, matcher, group)
}

fn exclude(matcher: ContentMatcher, group: &str) -> ContentDescriptorSpec {
    ContentDescriptorSpec::new(ContentMode::Exclude, matcher, group)
}

#[test]
fn decision_table() {
    let inside = dep("com.acme:core", "1.0");
    let excluded = dep("com.acme.internal:core", "1.0");
    let outside = dep("org.other:core", "1.0");

    let both = vec![
        include(ContentMatcher::Subgroup, "com.acme"),
        exclude(ContentMatcher::Exact, "com.acme.internal"),
    ];
    assert!(matches_content_descriptor(&inside, &both).unwrap());
    assert!(!matches_content_descriptor(&excluded, &both).unwrap());
    assert!(!matches_content_descriptor(&outside, &both).unwrap());

    let only_include = vec![include(ContentMatcher::Exact, "com.acme")];
    assert!(matches_content_descriptor(&inside, &only_include).unwrap());
    assert!(!matches_content_descriptor(&outside, &only_include).unwrap());

    let only_exclude = vec![exclude(ContentMatcher::Exact, "com.acme")];
    assert!(!matches_content_descriptor(&inside, &only_exclude).unwrap());
    assert!(matches_content_descriptor(&outside, &only_exclude).unwrap());

    assert!(matches_content_descriptor(&outside, &[]).unwrap());
}

#[test]
fn subgroup_respects_segment_boundaries() {
    let rules = vec![include(ContentMatcher::Subgroup, "com.foo")];
    assert!(matches_content_descriptor(&dep("com.foo:a", "1"), &rules).unwrap());
    assert!(matches_content_descriptor(&dep("com.foo.bar.baz:a", "1"), &rules).unwrap());
    assert!(!matches_content_descriptor(&dep("com.foobar:a", "1"), &rules).unwrap());
    assert!(!matches_content_descriptor(&dep("com:a", "1"), &rules).unwrap());
}

#[test]
fn regex_matcher_searches_unanchored() {
    let rules = vec![include(ContentMatcher::Regex, r"acme")];
    assert!(matches_content_descriptor(&dep("com.acme.tools:a", "1"), &rules).unwrap());
    assert!(!matches_content_descriptor(&dep("org.other:a", "1"), &rules).unwrap());
}

#[test]
fn version_rules_use_gradle_ranges() {
    let rules = vec![
        include(ContentMatcher::Exact, "com.acme")
            .with_artifact("core")
            .with_version("[2.0,3.0)"),
    ];
    assert!(matches_content_descriptor(&dep("com.acme:core", "2.5.1"), &rules).unwrap());
    assert!(!matches_content_descriptor(&dep("com.acme:core", "3.0"), &rules).unwrap());
    assert!(!matches_content_descriptor(&dep("com.acme:other", "2.5.1"), &rules).unwrap());
}

#[test]
fn plugins_match_on_marker_artifact() {
    let mut plugin = dep("org.jetbrains.kotlin.jvm", "1.9.20").with_dep_type(DepType::Plugin);
    plugin.package_name = Some("org.jetbrains.kotlin.jvm:org.jetbrains.kotlin.jvm.gradle.plugin".into());

    let rules = vec![include(ContentMatcher::Subgroup, "org.jetbrains")];
    assert!(matches_content_descriptor(&plugin, &rules).unwrap());
}

#[test]
fn nameless_dependency_cannot_be_matched() {
    let dep = PackageDependency::default();
    let err = matches_content_descriptor(&dep, &[include(ContentMatcher::Exact, "x")]).unwrap_err();
    assert!(matches!(err, ExtractError::UnidentifiableDependency));
}
