//! Filesystem and path utilities.
//!
//! - [`fs`] - batch loading and discovery of package files
//! - [`path`] - sub-format classification predicates and the processing-order heuristic

pub mod fs;
pub mod path;

pub use fs::{FileContents, FileLoader, LocalFileLoader, discover_package_files};
pub use path::reorder_files;
