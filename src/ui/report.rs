//! ui::report
//!
//! Plain-text rendering of validation results.
//!
//! # Layout
//!
//! ```text
//! Errors: 1
//! Warnings: 1
//! [custom] color.red: Invalid color space 'cmyk'. Must be one of: ...
//! [color-format] color.blue: Color 'blue' should be hex, ...
//!
//! Contrast: 1 of 2 pairs passed, 1 failed
//!   FAIL color.text on color.bg (body text): 1.16:1, needs 4.5:1 (AA_NORMAL)
//!        increase contrast by ~288%
//! ```

use crate::validate::contrast::{ContrastReport, ContrastResult};
use crate::validate::ValidationResult;

/// Render a result, including the contrast block when contrast ran.
pub fn format_result(result: &ValidationResult) -> String {
    let mut lines = vec![
        format!("Errors: {}", result.errors.len()),
        format!("Warnings: {}", result.warnings.len()),
    ];
    lines.extend(result.issues().map(ToString::to_string));

    let mut out = lines.join("\n");
    out.push('\n');

    if let Some(report) = &result.contrast {
        out.push('\n');
        out.push_str(&format_contrast_report(report));
    }
    out
}

/// Render the contrast summary and one entry per failing pair.
pub fn format_contrast_report(report: &ContrastReport) -> String {
    let mut out = format!(
        "Contrast: {} of {} pairs passed, {} failed\n",
        report.valid_pairs, report.total_pairs, report.invalid_pairs
    );
    for failure in report.failures() {
        out.push_str(&format_contrast_result(failure));
    }
    out
}

/// Render one pair outcome, with its suggestion on a second line.
pub fn format_contrast_result(result: &ContrastResult) -> String {
    let status = if result.passed { "PASS" } else { "FAIL" };
    let context = result
        .pair
        .context
        .as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default();

    let mut out = format!(
        "  {status} {} on {}{context}: {:.2}:1, needs {}:1 ({})\n",
        result.pair.foreground,
        result.pair.background,
        result.computed_ratio,
        result.required_ratio,
        result.pair.required_level,
    );
    if let Some(suggestion) = &result.suggestion {
        out.push_str(&format!("       {suggestion}\n"));
    }
    out
}

/// One-line status for a checked file.
pub fn format_status(name: &str, result: &ValidationResult) -> String {
    let verdict = if result.is_valid { "valid" } else { "invalid" };
    format!(
        "{name}: {verdict} ({} errors, {} warnings)",
        result.errors.len(),
        result.warnings.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::validate::contrast::{check_pair, ContrastPair, WcagLevel};
    use crate::validate::schema::Schema;
    use crate::validate::{validate, ValidateOptions};

    fn options() -> ValidateOptions {
        ValidateOptions::default().with_schema(Schema::strict())
    }

    #[test]
    fn counts_and_issue_lines() {
        let doc = json!({
            "a": { "$type": "color", "$value": { "colorSpace": "cmyk", "components": [0, 0, 0] } },
            "b": { "$type": "color", "$value": "blue" }
        });
        let text = format_result(&validate(&doc, &options()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Errors: 1");
        assert_eq!(lines[1], "Warnings: 1");
        assert!(lines[2].starts_with("[custom] a: Invalid color space 'cmyk'"));
        assert!(lines[3].starts_with("[color-format] b: "));
        assert!(!text.contains("Contrast:"));
    }

    #[test]
    fn contrast_block_lists_failures() {
        let doc = json!({
            "foreground": {
                "primary": { "$type": "color", "$value": "#000000" },
                "faint": { "$type": "color", "$value": "#eeeeee" }
            },
            "background": { "primary": { "$type": "color", "$value": "#ffffff" } }
        });
        let text = format_result(&validate(&doc, &options().with_contrast(true)));
        assert!(text.contains("Contrast: 1 of 2 pairs passed, 1 failed"));
        assert!(text.contains("FAIL foreground.faint on background.primary (faint text)"));
        assert!(text.contains("increase contrast by ~"));
        assert!(!text.contains("PASS"));
    }

    #[test]
    fn clean_result_is_two_lines() {
        let text = format_result(&validate(&json!({}), &options()));
        assert_eq!(text, "Errors: 0\nWarnings: 0\n");
    }

    #[test]
    fn pair_lines_are_newline_terminated() {
        let literal_pair = |fg: &str, level| {
            let pair = ContrastPair::new(fg.parse().unwrap(), "#ffffff".parse().unwrap(), level);
            check_pair(&json!({}), pair).unwrap()
        };

        assert_eq!(
            format_contrast_result(&literal_pair("#767676", WcagLevel::AaNormal)),
            "  PASS #767676 on #ffffff: 4.54:1, needs 4.5:1 (AA_NORMAL)\n"
        );
        assert_eq!(
            format_contrast_result(&literal_pair("#777777", WcagLevel::AaaNormal)),
            concat!(
                "  FAIL #777777 on #ffffff: 4.48:1, needs 7:1 (AAA_NORMAL)\n",
                "       increase contrast by ~56%\n",
            )
        );
    }

    #[test]
    fn status_line() {
        let result = validate(&json!({}), &options());
        assert_eq!(
            format_status("tokens.json", &result),
            "tokens.json: valid (0 errors, 0 warnings)"
        );
    }
}
