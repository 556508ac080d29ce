//! Global constants used throughout the gradle-deps codebase.
//!
//! Registry URLs, datasource identifiers and file-name conventions that more than one
//! module needs. Defining them centrally keeps the classifier, the parsers and the merger
//! in agreement.

/// Datasource id assigned to every dependency that does not declare its own.
pub const MAVEN_DATASOURCE: &str = "maven";

/// Gradle Plugin Portal, the fallback registry for plugins that match no declared
/// plugin repository.
pub const GRADLE_PLUGIN_PORTAL_URL: &str = "https://plugins.gradle.org/m2/";

/// Maven Central, as declared by `mavenCentral()`.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// Google's Maven repository, as declared by `google()`.
pub const GOOGLE_MAVEN_URL: &str = "https://dl.google.com/android/maven2/";

/// JCenter, as declared by `jcenter()`.
pub const JCENTER_URL: &str = "https://jcenter.bintray.com/";

/// Directory holding build logic compiled before the main build.
pub const BUILD_SRC_DIR: &str = "buildSrc";

/// First line of a `versions.lock` written by the consistent-versions plugin.
pub const GCV_LOCK_HEADER: &str = "# Run ./gradlew --write-locks to regenerate this file";

/// File name of the consistent-versions version pins.
pub const GCV_PROPS_FILE_NAME: &str = "versions.props";

/// File name of the consistent-versions lock file.
pub const GCV_LOCK_FILE_NAME: &str = "versions.lock";

/// Default nesting limit for `apply from:` includes.
pub const DEFAULT_MAX_APPLY_DEPTH: usize = 8;

/// Directory names skipped when discovering package files.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[".git", ".gradle", "build", "node_modules"];
