//! config command - Show the resolved configuration

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Print where configuration came from and what it resolved to.
pub fn show(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    let source = config
        .loaded_from()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    let schema = config
        .schema_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("built-in {}", config.profile()));

    println!("source: {source}");
    println!("profile: {}", config.profile());
    println!("schema: {schema}");

    match config.contrast() {
        None => println!("contrast: off"),
        Some(contrast) => {
            println!("contrast: {}", contrast.level);
            if contrast.color_pairs.is_empty() {
                println!("pairs: derived");
            } else {
                let pairs: Vec<String> = contrast
                    .color_pairs
                    .iter()
                    .map(|p| format!("{} on {} ({})", p.foreground, p.background, p.required_level))
                    .collect();
                println!("pairs:\n{}", output::format_list(&pairs, "  - "));
            }
        }
    }

    Ok(())
}
