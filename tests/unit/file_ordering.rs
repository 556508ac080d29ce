//! Processing order of package files.

use gradle_deps::extract::processing_order;
use gradle_deps::utils::reorder_files;

fn strings(paths: &[&str]) -> Vec<String> {
    paths.iter().map(ToString::to_string).collect()
}

#[test]
fn reorder_is_total_and_stable_under_permutation() {
    let forward = strings(&[
        "b/build.gradle",
        "a/build.gradle",
        "gradle/libs.versions.toml",
        "build.gradle.kts",
        "settings.gradle.kts",
        "gradle.properties",
        "a/gradle.properties",
    ]);
    let mut backward = forward.clone();
    backward.reverse();

    let ordered = reorder_files(forward);
    assert_eq!(ordered, reorder_files(backward));
    assert_eq!(
        ordered,
        vec![
            "gradle.properties",
            "settings.gradle.kts",
            "build.gradle.kts",
            "a/gradle.properties",
            "a/build.gradle",
            "b/build.gradle",
            "gradle/libs.versions.toml",
        ]
    );
}

#[test]
fn kotlin_sources_run_twice_before_everything_else() {
    let order = processing_order(&strings(&["build.gradle", "buildSrc/src/main/kotlin/Versions.kt"]));
    assert_eq!(
        order,
        vec![
            "buildSrc/src/main/kotlin/Versions.kt",
            "buildSrc/src/main/kotlin/Versions.kt",
            "build.gradle",
        ]
    );
}

#[test]
fn no_kotlin_sources() {
    let order = processing_order(&strings(&["app/build.gradle", "build.gradle"]));
    assert_eq!(order, vec!["build.gradle", "app/build.gradle"]);
}
