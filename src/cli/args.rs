//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Use this config file instead of searching
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::SchemaProfile;
use crate::validate::contrast::WcagLevel;

/// tokencheck - Semantic validator for DTCG design-token documents
#[derive(Parser, Debug)]
#[command(name = "tokencheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if tokencheck was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of the search path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate token documents
    #[command(
        name = "check",
        long_about = "Validate one or more design-token documents.\n\n\
            Each file is checked against a JSON-Schema (built-in strict or permissive, \
            or a custom document), then every token is checked against the rules for \
            its $type, and alias references are searched for cycles. With --contrast, \
            foreground/background color pairs are scored against WCAG thresholds.\n\n\
            Exits with status 1 if any file has errors. Warnings never fail a check.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check a token file with the strict profile
    tokencheck check tokens.json

    # Accept extended types such as opacity and spacing
    tokencheck check tokens.json --profile permissive

    # Add WCAG AAA contrast checks over derived pairs
    tokencheck check tokens.json --contrast --level AAA_NORMAL

    # Machine-readable output
    tokencheck check tokens/*.json --json"
    )]
    Check {
        /// Token documents to validate
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Schema profile (strict or permissive)
        #[arg(long)]
        profile: Option<SchemaProfile>,

        /// Custom JSON-Schema document
        #[arg(long, value_name = "PATH")]
        schema: Option<PathBuf>,

        /// Run WCAG contrast checks
        #[arg(long)]
        contrast: bool,

        /// WCAG level for derived pairs; implies --contrast
        #[arg(long)]
        level: Option<WcagLevel>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the contrast between two colors
    #[command(
        name = "contrast",
        after_help = "\
WORKFLOW EXAMPLES:
    tokencheck contrast '#767676' '#ffffff'
    tokencheck contrast '#777' '#fff' --level AA_LARGE"
    )]
    Contrast {
        /// Foreground hex color
        foreground: String,

        /// Background hex color
        background: String,

        /// Required WCAG level
        #[arg(long, default_value_t = WcagLevel::AaNormal)]
        level: WcagLevel,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    tokencheck completion bash >> ~/.bashrc

    # Zsh
    tokencheck completion zsh > ~/.zfunc/_tokencheck

    # Fish
    tokencheck completion fish > ~/.config/fish/completions/tokencheck.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
