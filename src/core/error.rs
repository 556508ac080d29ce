//! Error handling for gradle-deps
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`ExtractError`]) for the library surface, so callers can
//!    tell a per-file parse failure from a run-level load failure
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for the CLI
//!
//! # Propagation
//!
//! Only a failure of the upfront batch load aborts an extraction run. Parse failures are
//! isolated to the file that produced them, and dependencies that cannot be identified are
//! dropped by the merger. Both end up as `debug` diagnostics rather than errors returned to
//! the caller.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gradle_deps::core::{ExtractError, user_friendly_error};
//!
//! let err = ExtractError::FileNotLoaded { path: "build.gradle".to_string() };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for extraction operations.
///
/// # Error Categories
///
/// ## Per-file
/// - [`FileNotLoaded`] - the loader returned no content for a requested file
/// - [`ParseError`] - a sub-format parser rejected the file
/// - [`TomlError`] - version catalog syntax errors from [`toml::de::Error`]
///
/// ## Per-dependency
/// - [`UnidentifiableDependency`] - neither a package name nor a dependency name is set
///
/// ## Run-level
/// - [`LoadFailed`] - the batch load failed as a whole
/// - [`ConfigError`] - the configuration file is invalid
/// - [`IoError`] - standard I/O errors from [`std::io::Error`]
///
/// [`FileNotLoaded`]: ExtractError::FileNotLoaded
/// [`ParseError`]: ExtractError::ParseError
/// [`TomlError`]: ExtractError::TomlError
/// [`UnidentifiableDependency`]: ExtractError::UnidentifiableDependency
/// [`LoadFailed`]: ExtractError::LoadFailed
/// [`ConfigError`]: ExtractError::ConfigError
/// [`IoError`]: ExtractError::IoError
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The file was requested but its content could not be loaded.
    #[error("File content not available: {path}")]
    FileNotLoaded {
        /// Path of the file, relative to the project root
        path: String,
    },

    /// A sub-format parser failed on a file.
    #[error("Failed to parse {file}: {reason}")]
    ParseError {
        /// Path of the file that failed to parse
        file: String,
        /// Parser-specific reason
        reason: String,
    },

    /// Version catalog TOML could not be parsed.
    #[error("Invalid version catalog syntax: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A dependency has neither `packageName` nor `depName`.
    #[error("Dependency has neither a package name nor a dependency name")]
    UnidentifiableDependency,

    /// A content descriptor pattern is not a valid regular expression.
    #[error("Invalid content descriptor pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message from the regex engine
        reason: String,
    },

    /// The batch file load failed.
    #[error("Failed to load package files: {reason}")]
    LoadFailed {
        /// Why the load failed
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExtractError {
    /// Shorthand for a [`ExtractError::ParseError`].
    pub fn parse(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

/// An error message with optional details and a suggestion, rendered for terminals.
#[derive(Debug)]
pub struct ErrorContext {
    /// The primary error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context for an error message with no suggestion or details.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the context to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// The full `anyhow` chain is kept in the details so `--verbose` output is not needed to
/// see the root cause.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join(": ");

    let ctx = if let Some(extract_error) = error.downcast_ref::<ExtractError>() {
        extract_error_context(extract_error)
    } else if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => ErrorContext::new(error.to_string())
                .with_suggestion("Check that the project root and file paths exist"),
            std::io::ErrorKind::PermissionDenied => ErrorContext::new(error.to_string())
                .with_suggestion("Check read permissions on the project directory"),
            _ => ErrorContext::new(error.to_string()),
        }
    } else if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        ErrorContext::new(format!("Invalid TOML: {toml_error}"))
            .with_suggestion("Check the TOML syntax of the configuration file")
    } else {
        ErrorContext::new(error.to_string())
    };

    if chain.is_empty() || ctx.details.is_some() {
        ctx
    } else {
        ctx.with_details(chain)
    }
}

fn extract_error_context(error: &ExtractError) -> ErrorContext {
    let ctx = ErrorContext::new(error.to_string());
    match error {
        ExtractError::LoadFailed { .. } => ctx
            .with_suggestion("Run from the project root or pass --root")
            .with_details("All package files are read before parsing starts; any read failure here aborts the run"),
        ExtractError::ConfigError { .. } => {
            ctx.with_suggestion("Check the file passed with --config")
        }
        ExtractError::TomlError(_) => {
            ctx.with_suggestion("Verify quotes, brackets and table headers in the TOML file")
        }
        _ => ctx,
    }
}
