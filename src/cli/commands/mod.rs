//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Merges CLI flags over the loaded configuration
//! 2. Reads its inputs from disk
//! 3. Calls the library and formats the outcome through [`crate::ui`]
//!
//! Handlers return the process exit status; `Err` is reserved for failures
//! of the command itself.

mod check;
mod completion;
mod config_cmd;
mod contrast;

pub use check::{check, CheckArgs};
pub use completion::completion;
pub use config_cmd::show as config_show;
pub use contrast::contrast;

use std::process::ExitCode;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Check {
            files,
            profile,
            schema,
            contrast,
            level,
            json,
        } => check(
            ctx,
            CheckArgs {
                files,
                profile,
                schema,
                contrast,
                level,
                json,
            },
        ),
        Command::Contrast {
            foreground,
            background,
            level,
            json,
        } => contrast(ctx, &foreground, &background, level, json),
        Command::Config => config_show(ctx).map(|()| ExitCode::SUCCESS),
        Command::Completion { shell } => completion(shell).map(|()| ExitCode::SUCCESS),
    }
}

/// Exit status for a pass/fail outcome.
pub(crate) fn status(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
