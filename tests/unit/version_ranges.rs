//! Gradle version ordering and dynamic version matching.

use std::cmp::Ordering;

use gradle_deps::version::{compare, is_dynamic, matches};

#[test]
fn ordering_follows_gradle_rules() {
    assert_eq!(compare("1.10", "1.9"), Ordering::Greater);
    assert_eq!(compare("1.0-SNAPSHOT", "1.0"), Ordering::Less);
    assert_eq!(compare("1.0-rc-1", "1.0-SNAPSHOT"), Ordering::Less);
    assert_eq!(compare("1.0-dev", "1.0-alpha"), Ordering::Less);
    assert_eq!(compare("32.1.2-jre", "32.1.2-android"), Ordering::Greater);
}

#[test]
fn ranges_prefixes_and_latest() {
    assert!(matches("2.0.9", "[2.0,2.1)"));
    assert!(!matches("2.1", "[2.0,2.1)"));
    assert!(matches("5.9.3", "5.+"));
    assert!(matches("0.0.1", "latest.integration"));
    assert!(matches("1.0.0", "1.0.0"));
    assert!(!matches("1.0.0", "1.0.1"));
}

#[test]
fn dynamic_detection() {
    assert!(is_dynamic("(,2.0]"));
    assert!(is_dynamic("1.2.+"));
    assert!(!is_dynamic("2.0.9"));
}
