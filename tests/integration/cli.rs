use assert_cmd::Command;
use predicates::prelude::*;

use gradle_deps::models::PackageFile;

use crate::common::TestProject;

fn sample_project() -> TestProject {
    let project = TestProject::new().unwrap();
    project.write_file("gradle.properties", "guavaVersion=32.1.2-jre\n").unwrap();
    project.write_file("settings.gradle", "rootProject.name = 'sample'\ninclude 'app'\n").unwrap();
    project
        .write_file(
            "app/build.gradle",
            "repositories {\n    mavenCentral()\n}\ndependencies {\n    implementation \"com.google.guava:guava:$guavaVersion\"\n}\n",
        )
        .unwrap();
    project.write_file("build/generated/build.gradle", "dependencies { implementation 'x:y:1.0' }\n").unwrap();
    project
}

/// JSON output lists every discovered file and skips ignored directories
#[test]
fn test_extract_json_output() {
    let project = sample_project();
    let output = project.run_gradle_deps(&["extract"]).unwrap();
    output.assert_success();

    let records: Vec<PackageFile> = serde_json::from_str(&output.stdout).unwrap();
    let files: Vec<&str> = records.iter().map(|r| r.package_file.as_str()).collect();
    assert_eq!(files, vec!["app/build.gradle", "gradle.properties", "settings.gradle"]);

    let props = records.iter().find(|r| r.package_file == "gradle.properties").unwrap();
    assert_eq!(props.deps.len(), 1);
    assert_eq!(props.deps[0].dep_name.as_deref(), Some("com.google.guava:guava"));
    assert_eq!(props.deps[0].shared_variable_name.as_deref(), Some("guavaVersion"));
}

#[test]
fn test_extract_json_uses_camel_case() {
    let project = sample_project();
    let output = project.run_gradle_deps(&["extract"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("\"packageFile\": \"gradle.properties\"")
        .assert_stdout_contains("\"fileReplacePosition\": 13")
        .assert_stdout_contains("\"registryUrls\"");
}

#[test]
fn test_extract_summary_format() {
    let project = sample_project();
    Command::cargo_bin("gradle-deps")
        .unwrap()
        .args(["extract", "--format", "summary"])
        .current_dir(project.project_path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradle.properties"))
        .stdout(predicate::str::contains("com.google.guava:guava 32.1.2-jre (via guavaVersion)"))
        .stdout(predicate::str::contains("app/build.gradle").not());
}

#[test]
fn test_extract_explicit_files_and_root() {
    let project = sample_project();
    let root = project.project_path().to_str().unwrap().to_string();
    Command::cargo_bin("gradle-deps")
        .unwrap()
        .args(["extract", "--root", root.as_str(), "settings.gradle"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies found"));
}

#[test]
fn test_extract_empty_project() {
    let project = TestProject::new().unwrap();
    let output = project.run_gradle_deps(&["extract"]).unwrap();
    output.assert_success().assert_stdout_contains("No dependencies found");
}

#[test]
fn test_extract_missing_root_fails() {
    let project = TestProject::new().unwrap();
    let output = project.run_gradle_deps(&["extract", "--root", "does-not-exist"]).unwrap();
    assert!(!output.success);
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("does-not-exist"), "stderr: {}", output.stderr);
}

#[test]
fn test_config_file_ignore_dirs() {
    let project = sample_project();
    project.write_file("gradle-deps.toml", "ignore_dirs = [\"app\"]\n").unwrap();
    let output = project.run_gradle_deps(&["--config", "gradle-deps.toml", "extract"]).unwrap();
    output.assert_success();

    let records: Vec<PackageFile> = serde_json::from_str(&output.stdout).unwrap();
    assert!(records.iter().any(|r| r.package_file == "build/generated/build.gradle"));
    assert!(records.iter().all(|r| r.package_file != "app/build.gradle"));
}

#[test]
fn test_invalid_config_file_fails() {
    let project = sample_project();
    project.write_file("gradle-deps.toml", "max_apply_depth = \"deep\"\n").unwrap();
    let output = project.run_gradle_deps(&["--config", "gradle-deps.toml", "extract"]).unwrap();
    assert!(!output.success);
}
