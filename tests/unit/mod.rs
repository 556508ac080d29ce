//! Unit test suite for gradle-deps
//!
//! Exercises the public building blocks in isolation: content descriptor matching,
//! registry selection, variable scoping, file ordering, version matching and the
//! version catalog parser.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod catalog;
mod content_rules;
mod file_ordering;
mod registry_selection;
mod variable_scopes;
mod version_ranges;
