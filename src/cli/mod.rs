//! Command-line interface for gradle-deps.
//!
//! # Available Commands
//!
//! - `extract` - extract dependencies and their registries from a Gradle project
//!
//! # Global Options
//!
//! - `--verbose` - enable debug output
//! - `--quiet` - suppress everything except errors
//! - `--config <FILE>` - read [`ExtractConfig`] from a TOML file
//!
//! Logging goes to stderr so `extract` output can be piped. `RUST_LOG` overrides the
//! level chosen by `--verbose` / `--quiet`.
//!
//! ```bash
//! gradle-deps --verbose extract --root path/to/project
//! gradle-deps --config gradle-deps.toml extract --format summary
//! ```

pub mod extract;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::ExtractConfig;

pub use extract::{ExtractCommand, OutputFormat};

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter; `None` logs errors only
    pub log_level: Option<String>,
    /// Extraction config file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stderr log subscriber. `RUST_LOG` wins over the configured level.
    pub fn init_logging(&self) {
        let default = self.log_level.as_deref().unwrap_or("error");
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Gradle dependency extraction.
#[derive(Parser, Debug)]
#[command(
    name = "gradle-deps",
    about = "Extract dependencies and package registries from Gradle builds",
    version,
    author,
    long_about = "gradle-deps reads the build files of a Gradle project (properties, version catalogs, \
                  buildSrc sources, Groovy and Kotlin DSL scripts, consistent-versions pins) and reports \
                  every dependency with the file and position of its version and the registries that can serve it."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to an extraction config file (TOML)
    #[arg(short, long, global = true, env = "GRADLE_DEPS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract dependencies from a Gradle project
    Extract(ExtractCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with; `main` renders it for the user.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// ```rust
    /// use clap::Parser;
    /// use gradle_deps::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["gradle-deps", "--verbose", "extract"]);
    /// assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit [`CliConfig`].
    ///
    /// # Errors
    ///
    /// Fails when the extraction config cannot be loaded or the command fails.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let extract_config = ExtractConfig::load(config.config_path.as_deref())?;

        match self.command {
            Commands::Extract(cmd) => cmd.execute(&extract_config).await,
        }
    }
}
