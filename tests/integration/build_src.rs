use gradle_deps::config::ExtractConfig;
use gradle_deps::extract::extract_all_package_files;
use gradle_deps::models::{DepType, PackageFile};
use gradle_deps::parser::ReferenceParser;
use gradle_deps::test_utils::InMemoryLoader;

use crate::common::{dep, record, version_text};

const DEPS_KT: &str = r#"object Deps {
    const val okhttp = "com.squareup.okhttp3:okhttp:${Versions.okhttp}"
    const val junit = "junit:junit:4.13.2"
}
"#;

const VERSIONS_KT: &str = r#"object Versions {
    const val okhttp = "4.12.0"
    const val retrofit = "2.9.0"
}
"#;

const APP_BUILD: &str = r#"
dependencies {
    implementation "com.squareup.retrofit2:retrofit:${Versions.retrofit}"
}
"#;

async fn extract(loader: &InMemoryLoader) -> Vec<PackageFile> {
    extract_all_package_files(&ExtractConfig::default(), loader, &ReferenceParser::default(), &loader.paths())
        .await
        .unwrap()
        .unwrap()
}

/// Constants declared in a later Kotlin file are picked up by the second pass
#[tokio::test]
async fn test_two_pass_kotlin_resolution() {
    let loader = InMemoryLoader::new()
        .with_file("buildSrc/src/main/kotlin/Deps.kt", DEPS_KT)
        .with_file("buildSrc/src/main/kotlin/Versions.kt", VERSIONS_KT);
    let records = extract(&loader).await;

    let okhttp = dep(&records, "com.squareup.okhttp3:okhttp");
    assert_eq!(okhttp.manager_data.package_file.as_deref(), Some("buildSrc/src/main/kotlin/Versions.kt"));
    assert_eq!(okhttp.shared_variable_name.as_deref(), Some("Versions.okhttp"));
    assert_eq!(version_text(VERSIONS_KT, okhttp), "4.12.0");

    // The literal in Deps.kt is seen in both passes but reported once
    let junit = dep(&records, "junit:junit");
    assert_eq!(version_text(DEPS_KT, junit), "4.13.2");
    assert_eq!(record(&records, "buildSrc/src/main/kotlin/Deps.kt").deps.len(), 1);
}

/// Kotlin constants are visible to every build script
#[tokio::test]
async fn test_kotlin_constants_visible_to_scripts() {
    let loader = InMemoryLoader::new()
        .with_file("buildSrc/src/main/kotlin/Versions.kt", VERSIONS_KT)
        .with_file("app/build.gradle", APP_BUILD);
    let records = extract(&loader).await;

    let retrofit = dep(&records, "com.squareup.retrofit2:retrofit");
    assert_eq!(retrofit.manager_data.package_file.as_deref(), Some("buildSrc/src/main/kotlin/Versions.kt"));
    assert_eq!(version_text(VERSIONS_KT, retrofit), "2.9.0");
}

/// buildSrc dependencies are development dependencies unless Kotlin sources exist
#[tokio::test]
async fn test_build_src_dependency_type() {
    let build_src = "dependencies {\n    implementation 'com.google.guava:guava:32.1.2-jre'\n}\n";

    let loader = InMemoryLoader::new().with_file("buildSrc/build.gradle", build_src);
    let records = extract(&loader).await;
    assert_eq!(dep(&records, "com.google.guava:guava").dep_type, Some(DepType::DevDependencies));

    let loader = loader.with_file("buildSrc/src/main/kotlin/Versions.kt", VERSIONS_KT);
    let records = extract(&loader).await;
    assert_eq!(dep(&records, "com.google.guava:guava").dep_type, Some(DepType::Dependencies));
}
