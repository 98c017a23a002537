//! check command - Validate token documents

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::status;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::SchemaProfile;
use crate::ui::{output, report};
use crate::validate::contrast::WcagLevel;
use crate::validate::{validate_str, ValidateOptions, ValidationResult};

/// Arguments of `tokencheck check`.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub profile: Option<SchemaProfile>,
    pub schema: Option<PathBuf>,
    pub contrast: bool,
    pub level: Option<WcagLevel>,
    pub json: bool,
}

#[derive(Serialize)]
struct FileResult<'a> {
    file: &'a Path,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Validate every file; exit 1 if any has errors.
pub fn check(ctx: &Context, args: CheckArgs) -> Result<ExitCode> {
    let mut config = ctx.load_config()?;
    apply_overrides(ctx, &mut config, &args)?;
    let options = config.to_options().context("Failed to load schema")?;

    let verbosity = ctx.verbosity();
    output::debug(
        format!(
            "profile={} contrast={}",
            config.profile(),
            config.contrast().is_some()
        ),
        verbosity,
    );

    let mut results = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let result = check_file(ctx, file, &options)?;
        results.push((file.as_path(), result));
    }
    let all_valid = results.iter().all(|(_, r)| r.is_valid);

    if args.json {
        let entries: Vec<FileResult<'_>> = results
            .iter()
            .map(|(file, result)| FileResult {
                file: *file,
                result,
            })
            .collect();
        output::json(&entries).context("Failed to serialize results")?;
    } else {
        for (file, result) in &results {
            let name = file.display().to_string();
            if verbosity.is_quiet() {
                if !result.is_valid {
                    output::error(report::format_status(&name, result));
                }
                continue;
            }
            output::print(report::format_status(&name, result), verbosity);
            output::print(report::format_result(result).trim_end(), verbosity);
        }
    }

    Ok(status(all_valid))
}

fn check_file(ctx: &Context, file: &Path, options: &ValidateOptions) -> Result<ValidationResult> {
    let path = ctx.resolve(file)?;
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    tracing::debug!(file = %path.display(), bytes = source.len(), "checking");
    Ok(validate_str(&source, options))
}

/// CLI flags take precedence over the config file.
fn apply_overrides(ctx: &Context, config: &mut Config, args: &CheckArgs) -> Result<()> {
    if let Some(profile) = args.profile {
        config.set_profile(profile);
    }
    if let Some(schema) = &args.schema {
        config.set_schema_path(ctx.resolve(schema)?);
    }
    if args.contrast || args.level.is_some() {
        let mut contrast = config.contrast().cloned().unwrap_or_default();
        if let Some(level) = args.level {
            contrast.level = level;
        }
        config.set_contrast(Some(contrast));
    }
    Ok(())
}
