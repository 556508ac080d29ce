//! Gradle version matching.
//!
//! Content descriptors may restrict a registry to a version, written either as an exact
//! version or as one of Gradle's dynamic forms. [`matches`] answers whether a declared
//! dependency version satisfies such an expression.
//!
//! # Supported expressions
//!
//! | Expression | Meaning |
//! |---|---|
//! | `1.2.3` | exactly `1.2.3` under Gradle ordering |
//! | `[1.0,2.0)` | `1.0 <= v < 2.0`; `]` may stand in for `(` as in Gradle |
//! | `[1.0,)` / `(,2.0]` | half-open ranges |
//! | `1.2.+` / `+` | prefix match on the text before `+` |
//! | `latest.release`, `latest.integration` | any version |
//!
//! # Examples
//!
//! ```rust
//! use gradle_deps::version::matches;
//!
//! assert!(matches("1.5.0", "[1.0,2.0)"));
//! assert!(!matches("2.0", "[1.0,2.0)"));
//! assert!(matches("1.2.7", "1.2.+"));
//! ```

pub mod comparison;

use std::cmp::Ordering;

pub use comparison::compare;

#[derive(Debug, PartialEq, Eq)]
struct Bound<'a> {
    version: &'a str,
    inclusive: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct Range<'a> {
    lower: Option<Bound<'a>>,
    upper: Option<Bound<'a>>,
}

fn parse_range(expr: &str) -> Option<Range<'_>> {
    let expr = expr.trim();
    if expr.len() < 2 || !expr.contains(',') {
        return None;
    }
    let first = expr.chars().next()?;
    let last = expr.chars().last()?;
    let lower_inclusive = match first {
        '[' => true,
        '(' | ']' => false,
        _ => return None,
    };
    let upper_inclusive = match last {
        ']' => true,
        ')' | '[' => false,
        _ => return None,
    };

    let inner = &expr[1..expr.len() - 1];
    let (low, high) = inner.split_once(',')?;
    let (low, high) = (low.trim(), high.trim());

    Some(Range {
        lower: (!low.is_empty()).then_some(Bound {
            version: low,
            inclusive: lower_inclusive,
        }),
        upper: (!high.is_empty()).then_some(Bound {
            version: high,
            inclusive: upper_inclusive,
        }),
    })
}

impl Range<'_> {
    fn contains(&self, version: &str) -> bool {
        let above_lower = self.lower.as_ref().is_none_or(|bound| {
            match compare(version, bound.version) {
                Ordering::Greater => true,
                Ordering::Equal => bound.inclusive,
                Ordering::Less => false,
            }
        });
        let below_upper = self.upper.as_ref().is_none_or(|bound| {
            match compare(version, bound.version) {
                Ordering::Less => true,
                Ordering::Equal => bound.inclusive,
                Ordering::Greater => false,
            }
        });
        above_lower && below_upper
    }
}

/// Whether `version` satisfies `expr`, which is an exact version or a Gradle dynamic
/// version.
pub fn matches(version: &str, expr: &str) -> bool {
    let expr = expr.trim();
    let version = version.trim();

    if expr.starts_with("latest.") {
        return true;
    }

    if let Some(prefix) = expr.strip_suffix('+') {
        return version.starts_with(prefix);
    }

    if let Some(range) = parse_range(expr) {
        return range.contains(version);
    }

    compare(version, expr) == Ordering::Equal
}

/// Whether `expr` is a dynamic version (range, prefix or `latest.*`) rather than an exact
/// one.
pub fn is_dynamic(expr: &str) -> bool {
    let expr = expr.trim();
    expr.starts_with("latest.") || expr.ends_with('+') || parse_range(expr).is_some()
}
