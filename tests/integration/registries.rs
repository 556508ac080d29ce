use gradle_deps::config::ExtractConfig;
use gradle_deps::constants::{GRADLE_PLUGIN_PORTAL_URL, MAVEN_CENTRAL_URL};
use gradle_deps::extract::extract_all_package_files;
use gradle_deps::models::{DepType, PackageFile};
use gradle_deps::parser::ReferenceParser;
use gradle_deps::test_utils::InMemoryLoader;

use crate::common::dep;

const SETTINGS: &str = r#"
pluginManagement {
    repositories {
        maven { url 'https://plugins.acme.com/m2' }
    }
}
"#;

const BUILD: &str = r#"
plugins {
    id 'com.acme.conventions' version '1.2.0'
}

repositories {
    mavenCentral()
    exclusiveContent {
        forRepository {
            maven { url "https://jitpack.io" }
        }
        filter {
            includeGroupAndSubgroups "com.github"
        }
    }
}

dependencies {
    implementation 'com.github.user:lib:1.0'
    implementation 'org.slf4j:slf4j-api:2.0.9'
}
"#;

async fn extract(loader: &InMemoryLoader, config: &ExtractConfig) -> Vec<PackageFile> {
    extract_all_package_files(config, loader, &ReferenceParser::default(), &loader.paths())
        .await
        .unwrap()
        .unwrap()
}

/// Exclusive content wins, other dependencies see the regular registries
#[tokio::test]
async fn test_exclusive_and_regular_registries() {
    let loader = InMemoryLoader::new().with_file("settings.gradle", SETTINGS).with_file("build.gradle", BUILD);
    let records = extract(&loader, &ExtractConfig::default()).await;

    assert_eq!(dep(&records, "com.github.user:lib").registry_urls, vec!["https://jitpack.io"]);
    assert_eq!(dep(&records, "org.slf4j:slf4j-api").registry_urls, vec![MAVEN_CENTRAL_URL]);
}

/// Plugins resolve against pluginManagement repositories
#[tokio::test]
async fn test_plugin_registry_from_settings() {
    let loader = InMemoryLoader::new().with_file("settings.gradle", SETTINGS).with_file("build.gradle", BUILD);
    let records = extract(&loader, &ExtractConfig::default()).await;

    let plugin = dep(&records, "com.acme.conventions");
    assert_eq!(plugin.dep_type, Some(DepType::Plugin));
    assert_eq!(plugin.registry_urls, vec!["https://plugins.acme.com/m2"]);
}

/// Without plugin repositories plugins fall back to the configured portal
#[tokio::test]
async fn test_plugin_portal_fallback() {
    let loader = InMemoryLoader::new().with_file("build.gradle", BUILD);

    let records = extract(&loader, &ExtractConfig::default()).await;
    assert_eq!(dep(&records, "com.acme.conventions").registry_urls, vec![GRADLE_PLUGIN_PORTAL_URL]);

    let config = ExtractConfig {
        plugin_portal_url: "https://portal.acme.com/".to_string(),
        ..ExtractConfig::default()
    };
    let records = extract(&loader, &config).await;
    assert_eq!(dep(&records, "com.acme.conventions").registry_urls, vec!["https://portal.acme.com/"]);
}

/// Registries declared in any script apply to dependencies of every script
#[tokio::test]
async fn test_registries_are_shared_across_scripts() {
    let loader = InMemoryLoader::new()
        .with_file("build.gradle", "allprojects {\n    repositories {\n        google()\n    }\n}\n")
        .with_file("app/build.gradle", "dependencies {\n    implementation 'androidx.core:core-ktx:1.12.0'\n}\n");
    let records = extract(&loader, &ExtractConfig::default()).await;

    assert_eq!(
        dep(&records, "androidx.core:core-ktx").registry_urls,
        vec![gradle_deps::constants::GOOGLE_MAVEN_URL]
    );
}
