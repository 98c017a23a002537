//! contrast command - Score two literal colors

use std::process::ExitCode;

use anyhow::{bail, Context as _, Result};
use serde_json::Value;

use super::status;
use crate::cli::Context;
use crate::core::color::hex_to_rgb;
use crate::ui::{output, report};
use crate::validate::contrast::{check_pair, ColorSource, ContrastPair, WcagLevel};

/// Check `foreground` on `background`; exit 1 if the level is not met.
pub fn contrast(
    ctx: &Context,
    foreground: &str,
    background: &str,
    level: WcagLevel,
    json: bool,
) -> Result<ExitCode> {
    for color in [foreground, background] {
        if hex_to_rgb(color).is_none() {
            bail!("'{color}' is not a hex color (#rgb or #rrggbb)");
        }
    }

    let pair = ContrastPair::new(
        ColorSource::Literal(foreground.to_string()),
        ColorSource::Literal(background.to_string()),
        level,
    );
    let result = check_pair(&Value::Null, pair).context("Colors could not be resolved")?;

    if json {
        output::json(&result).context("Failed to serialize result")?;
    } else {
        output::print(report::format_contrast_result(&result).trim_end(), ctx.verbosity());
    }

    Ok(status(result.passed))
}
