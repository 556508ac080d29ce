use gradle_deps::config::ExtractConfig;
use gradle_deps::constants::MAVEN_DATASOURCE;
use gradle_deps::extract::extract_all_package_files;
use gradle_deps::models::{DepType, PackageFile};
use gradle_deps::parser::ReferenceParser;
use gradle_deps::test_utils::{InMemoryLoader, init_test_logging};

use crate::common::{dep, deps_named, record, version_text};

const PROPERTIES: &str = "slf4jVersion=2.0.9\norg.gradle.jvmargs=-Xmx2g\n";

const ROOT_BUILD: &str = r#"
dependencies {
    implementation "org.slf4j:slf4j-api:$slf4jVersion"
    implementation 'com.google.guava:guava:32.1.2-jre'
}
"#;

async fn extract(loader: &InMemoryLoader, files: &[String]) -> Option<Vec<PackageFile>> {
    init_test_logging(None);
    extract_all_package_files(&ExtractConfig::default(), loader, &ReferenceParser::default(), files)
        .await
        .unwrap()
}

/// Variables from gradle.properties move ownership of the version to the properties file
#[tokio::test]
async fn test_property_reference_owned_by_properties_file() {
    let loader = InMemoryLoader::new()
        .with_file("gradle.properties", PROPERTIES)
        .with_file("build.gradle", ROOT_BUILD);
    let records = extract(&loader, &loader.paths()).await.unwrap();

    assert_eq!(records.len(), 2);
    let slf4j = dep(&records, "org.slf4j:slf4j-api");
    assert_eq!(slf4j.manager_data.package_file.as_deref(), Some("gradle.properties"));
    assert_eq!(slf4j.shared_variable_name.as_deref(), Some("slf4jVersion"));
    assert_eq!(version_text(PROPERTIES, slf4j), "2.0.9");
    assert_eq!(slf4j.file_replace_position, slf4j.manager_data.file_replace_position);

    let guava = dep(&records, "com.google.guava:guava");
    assert_eq!(guava.manager_data.package_file.as_deref(), Some("build.gradle"));
    assert_eq!(version_text(ROOT_BUILD, guava), "32.1.2-jre");
    assert_eq!(guava.datasource.as_deref(), Some(MAVEN_DATASOURCE));
    assert_eq!(guava.dep_type, Some(DepType::Dependencies));

    assert_eq!(record(&records, "gradle.properties").deps.len(), 1);
    assert_eq!(record(&records, "build.gradle").deps.len(), 1);
}

/// A subproject properties file shadows the root one for its own scripts only
#[tokio::test]
async fn test_subproject_properties_shadow_root() {
    let app_props = "slf4jVersion=1.7.36\n";
    let loader = InMemoryLoader::new()
        .with_file("gradle.properties", PROPERTIES)
        .with_file("app/gradle.properties", app_props)
        .with_file("app/build.gradle", "dependencies { implementation \"org.slf4j:slf4j-api:$slf4jVersion\" }\n")
        .with_file("lib/build.gradle", "dependencies { implementation \"org.slf4j:slf4j-simple:$slf4jVersion\" }\n");
    let records = extract(&loader, &loader.paths()).await.unwrap();

    let api = dep(&records, "org.slf4j:slf4j-api");
    assert_eq!(api.current_value.as_deref(), Some("1.7.36"));
    assert_eq!(api.manager_data.package_file.as_deref(), Some("app/gradle.properties"));

    let simple = dep(&records, "org.slf4j:slf4j-simple");
    assert_eq!(simple.current_value.as_deref(), Some("2.0.9"));
    assert_eq!(simple.manager_data.package_file.as_deref(), Some("gradle.properties"));
}

/// A broken or unreadable file is skipped without affecting the others
#[tokio::test]
async fn test_failing_files_are_isolated() {
    let loader = InMemoryLoader::new()
        .with_file("gradle.properties", PROPERTIES)
        .with_file("build.gradle", ROOT_BUILD)
        .with_file("broken/build.gradle", "dependencies {\n    implementation 'a:b:1.0'\n}\n}\n")
        .with_file("gradle/libs.versions.toml", "[libraries\n");
    let mut files = loader.paths();
    files.push("missing/build.gradle".to_string());

    let records = extract(&loader, &files).await.unwrap();

    assert_eq!(records.len(), 5);
    assert!(record(&records, "broken/build.gradle").deps.is_empty());
    assert!(record(&records, "gradle/libs.versions.toml").deps.is_empty());
    assert!(record(&records, "missing/build.gradle").deps.is_empty());
    assert!(deps_named(&records, "a:b").is_empty());
    dep(&records, "com.google.guava:guava");
    dep(&records, "org.slf4j:slf4j-api");
}

/// Files without dependencies still get a record, in input order
#[tokio::test]
async fn test_records_for_every_input_file() {
    let loader = InMemoryLoader::new()
        .with_file("settings.gradle", "rootProject.name = 'demo'\ninclude 'app'\n")
        .with_file("build.gradle", ROOT_BUILD)
        .with_file("app/build.gradle", "apply plugin: 'java'\n");
    let records = extract(&loader, &loader.paths()).await.unwrap();

    let order: Vec<&str> = records.iter().map(|r| r.package_file.as_str()).collect();
    assert_eq!(order, vec!["settings.gradle", "build.gradle", "app/build.gradle"]);
    assert!(records.iter().all(|r| r.datasource == MAVEN_DATASOURCE));
}

/// No dependencies anywhere means no result at all
#[tokio::test]
async fn test_project_without_dependencies() {
    let loader = InMemoryLoader::new()
        .with_file("settings.gradle", "rootProject.name = 'demo'\n")
        .with_file("gradle.properties", "org.gradle.caching=true\n");
    assert!(extract(&loader, &loader.paths()).await.is_none());
    assert!(extract(&loader, &[]).await.is_none());
}

/// Listing a file twice or running twice does not change the result
#[tokio::test]
async fn test_duplicate_inputs_and_repeated_runs() {
    let loader = InMemoryLoader::new()
        .with_file("gradle.properties", PROPERTIES)
        .with_file("build.gradle", ROOT_BUILD);
    let once = extract(&loader, &loader.paths()).await.unwrap();

    let mut twice = loader.paths();
    twice.extend(loader.paths());
    assert_eq!(extract(&loader, &twice).await.unwrap(), once);
    assert_eq!(extract(&loader, &loader.paths()).await.unwrap(), once);
}

/// Versions declared in an applied script belong to that script
#[tokio::test]
async fn test_apply_from_moves_ownership() {
    let deps_script = "ext {\n    guavaVersion = '32.1.2-jre'\n}\n";
    let loader = InMemoryLoader::new()
        .with_file(
            "build.gradle",
            "apply from: 'gradle/deps.gradle'\ndependencies {\n    implementation \"com.google.guava:guava:$guavaVersion\"\n}\n",
        )
        .with_file("gradle/deps.gradle", deps_script);
    let records = extract(&loader, &loader.paths()).await.unwrap();

    let guava = dep(&records, "com.google.guava:guava");
    assert_eq!(guava.manager_data.package_file.as_deref(), Some("gradle/deps.gradle"));
    assert_eq!(version_text(deps_script, guava), "32.1.2-jre");
    assert_eq!(record(&records, "gradle/deps.gradle").deps.len(), 1);
    assert!(record(&records, "build.gradle").deps.is_empty());
}

/// A variable declared by a later script is not visible to an earlier one
#[tokio::test]
async fn test_no_forward_references_between_scripts() {
    let loader = InMemoryLoader::new()
        .with_file("build.gradle", "dependencies { implementation \"a:b:$laterVersion\" }\n")
        .with_file("versions.gradle", "ext.laterVersion = '1.0'\n");
    assert!(extract(&loader, &loader.paths()).await.is_none());
}

/// The loader failing is the only fatal error
#[tokio::test]
async fn test_loader_failure_aborts_the_run() {
    init_test_logging(None);
    let loader = InMemoryLoader::failing("storage unavailable");
    let err = extract_all_package_files(
        &ExtractConfig::default(),
        &loader,
        &ReferenceParser::default(),
        &["build.gradle".to_string()],
    )
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("storage unavailable"));
}
