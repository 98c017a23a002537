//! cli
//!
//! Command-line interface layer for tokencheck.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Own all file I/O and delegate validation to [`crate::validate`]
//!
//! # Exit status
//!
//! - `0`: every checked document is valid (or the command succeeded)
//! - `1`: a document has errors, or a contrast check failed
//! - `2`: the command itself failed (unreadable file, bad config)

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};

/// Invocation context shared by command handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub cwd: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Working directory for relative paths.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        Ok(self.cwd()?.join(path))
    }

    /// Load configuration, printing any warnings.
    pub fn load_config(&self) -> Result<Config> {
        let cwd = self.cwd()?;
        let explicit = self.config.as_deref().map(|p| cwd.join(p));
        let loaded = Config::load(explicit.as_deref(), &cwd).context("Failed to load config")?;
        for warning in &loaded.warnings {
            output::warn(warning, self.verbosity());
        }
        if let Some(path) = loaded.config.loaded_from() {
            output::debug(format!("config: {}", path.display()), self.verbosity());
        }
        Ok(loaded.config)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        config: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default = if debug { "tokencheck=debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
