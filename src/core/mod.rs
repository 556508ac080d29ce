//! Core types and error handling shared by every gradle-deps module.
//!
//! - [`error`] - [`ExtractError`] and the CLI-facing [`ErrorContext`]

pub mod error;

pub use error::{ErrorContext, ExtractError, user_friendly_error};

/// Result alias for library operations that fail with an [`ExtractError`].
pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
