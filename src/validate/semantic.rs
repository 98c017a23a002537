//! validate::semantic
//!
//! Per-`$type` semantic rules.
//!
//! # Rules
//!
//! - **Vocabulary**: a type unknown to the active profile is a
//!   `non-standard-type` (strict) or `unknown-type` (permissive) warning
//! - **color**: structured colors need a supported `colorSpace`, 3–4
//!   `components` and an `alpha` in `[0, 1]`; strings should look like a
//!   CSS color or a reference
//! - **dimension**: structured dimensions need a `px`/`rem` unit and a
//!   numeric `value`; strings should be a number with a unit, `0`, a
//!   reference or `calc(...)`
//! - **number**: the legacy nested-value shape is flagged; strings should
//!   be numeric or a reference
//! - **everything else**: the value must be present
//!
//! Group-level `$type` is not inherited by descendant tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::issues::{IssueKind, IssueSink, ValidationIssue};
use crate::core::graph::is_reference;
use crate::core::tree::{Group, Node, Token, Visit, VALUE_KEY};
use crate::core::types::{SchemaProfile, TokenPath, TokenType};

/// Color spaces accepted in structured color values.
pub const COLOR_SPACES: &[&str] = &[
    "srgb",
    "srgb-linear",
    "display-p3",
    "a98-rgb",
    "prophoto-rgb",
    "rec2020",
    "xyz-d50",
    "xyz-d65",
    "oklab",
    "oklch",
    "lab",
    "lch",
];

/// Units accepted in structured dimension values.
pub const DIMENSION_UNITS: &[&str] = &["px", "rem"];

/// Prefixes of string color values that need no warning.
const COLOR_PREFIXES: &[&str] = &["#", "rgb", "hsl", "oklch", "{"];

static DIMENSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d*\.?\d+(px|rem|em|%|vh|vw|vmin|vmax|pt|ch|ex)$")
        .expect("dimension pattern is valid")
});

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*\.?\d+$").expect("number pattern is valid"));

/// Applies semantic rules to classified nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticValidator {
    profile: SchemaProfile,
}

impl SemanticValidator {
    pub fn new(profile: SchemaProfile) -> Self {
        Self { profile }
    }

    /// Check one visited node.
    pub fn check(&self, visit: &Visit<'_>, sink: &mut IssueSink) {
        match &visit.node {
            Node::Token(token) => self.check_token(&visit.path, token, sink),
            Node::Group(group) => check_group(&visit.path, group, sink),
            Node::Unclassified(_) => {}
        }
    }

    fn check_token(&self, path: &TokenPath, token: &Token<'_>, sink: &mut IssueSink) {
        let Some(ty) = token.token_type() else {
            if token.reference().is_none() {
                sink.report(
                    IssueKind::MissingType,
                    path.as_str(),
                    "Token has no $type; declare one explicitly",
                );
            }
            check_present(path, token, sink);
            return;
        };

        self.check_vocabulary(path, &ty, sink);

        let Some(value) = check_present(path, token, sink) else {
            return;
        };
        match ty {
            TokenType::Color => check_color(path, value, sink),
            TokenType::Dimension => check_dimension(path, value, sink),
            TokenType::Number => check_number(path, value, sink),
            _ => {}
        }
    }

    fn check_vocabulary(&self, path: &TokenPath, ty: &TokenType, sink: &mut IssueSink) {
        if self.profile.recognizes(ty) {
            return;
        }
        let allowed = self.profile.vocabulary();
        let (kind, qualifier) = match self.profile {
            SchemaProfile::Strict => (IssueKind::NonStandardType, "not a standard DTCG type"),
            SchemaProfile::Permissive => (IssueKind::UnknownType, "not a known type"),
        };
        sink.push(
            ValidationIssue::new(
                kind,
                path.as_str(),
                format!(
                    "Type '{ty}' is {qualifier}. Known types: {}",
                    allowed.join(", ")
                ),
            )
            .with_data(json!({ "type": ty.as_str(), "allowed": allowed })),
        );
    }
}

fn check_group(path: &TokenPath, group: &Group<'_>, sink: &mut IssueSink) {
    if !path.is_root() {
        return;
    }
    let ty = group
        .token_type()
        .map(|t| t.as_str().to_string())
        .unwrap_or_default();
    sink.report(
        IssueKind::Naming,
        path.as_str(),
        format!("Root-level $type '{ty}' should be declared on a named group"),
    );
}

fn check_present<'a>(
    path: &TokenPath,
    token: &Token<'a>,
    sink: &mut IssueSink,
) -> Option<&'a Value> {
    let value = token.value();
    if value.is_none() {
        sink.report(IssueKind::MissingValue, path.as_str(), "Token has no $value");
    }
    value
}

fn check_color(path: &TokenPath, value: &Value, sink: &mut IssueSink) {
    match value {
        Value::Object(obj) => check_structured_color(path, obj, sink),
        Value::String(s) => {
            if !COLOR_PREFIXES.iter().any(|p| s.starts_with(p)) {
                sink.report(
                    IssueKind::ColorFormat,
                    path.as_str(),
                    format!("Color '{s}' should be hex, rgb(), hsl(), oklch() or a reference"),
                );
            }
        }
        other => sink.report(
            IssueKind::ColorFormat,
            path.as_str(),
            format!("Color value {other} should be a string or a structured color"),
        ),
    }
}

fn check_structured_color(path: &TokenPath, obj: &Map<String, Value>, sink: &mut IssueSink) {
    if let Some(space) = obj.get("colorSpace") {
        let known = space.as_str().is_some_and(|s| COLOR_SPACES.contains(&s));
        if !known {
            sink.push(
                ValidationIssue::new(
                    IssueKind::Custom,
                    path.as_str(),
                    format!(
                        "Invalid color space {}. Must be one of: {}",
                        display_value(space),
                        COLOR_SPACES.join(", ")
                    ),
                )
                .with_data(json!({ "allowed": COLOR_SPACES })),
            );
        }
    }

    if let Some(components) = obj.get("components") {
        let count = components.as_array().map(Vec::len);
        if !matches!(count, Some(3..=4)) {
            sink.report(
                IssueKind::Custom,
                path.as_str(),
                "Color components must be an array of 3 or 4 values",
            );
        }
    }

    if let Some(alpha) = obj.get("alpha") {
        let in_range = alpha.as_f64().is_some_and(|a| (0.0..=1.0).contains(&a));
        if !in_range {
            sink.report(
                IssueKind::Custom,
                path.as_str(),
                format!("Color alpha {alpha} must be a number between 0 and 1"),
            );
        }
    }
}

fn check_dimension(path: &TokenPath, value: &Value, sink: &mut IssueSink) {
    match value {
        Value::Object(obj) => {
            if let Some(unit) = obj.get("unit") {
                let known = unit.as_str().is_some_and(|u| DIMENSION_UNITS.contains(&u));
                if !known {
                    sink.report(
                        IssueKind::Custom,
                        path.as_str(),
                        format!(
                            "Invalid dimension unit {}. Must be px or rem",
                            display_value(unit)
                        ),
                    );
                }
            }
            if let Some(amount) = obj.get("value") {
                if !amount.is_number() {
                    sink.report(
                        IssueKind::Custom,
                        path.as_str(),
                        format!("Dimension value {amount} must be a number"),
                    );
                }
            }
        }
        Value::String(s) => {
            let ok = s == "0"
                || DIMENSION_PATTERN.is_match(s)
                || is_reference(s)
                || s.starts_with("calc(");
            if !ok {
                sink.report(
                    IssueKind::DimensionFormat,
                    path.as_str(),
                    format!("Dimension '{s}' should be a number with a unit, 0, a reference or calc()"),
                );
            }
        }
        Value::Number(n) if n.as_f64() != Some(0.0) => sink.report(
            IssueKind::DimensionFormat,
            path.as_str(),
            format!("Dimension {n} has no unit"),
        ),
        _ => {}
    }
}

fn check_number(path: &TokenPath, value: &Value, sink: &mut IssueSink) {
    let nested = value
        .as_object()
        .and_then(|o| o.get(VALUE_KEY).or_else(|| o.get("value")));

    if let Some(inner) = nested {
        sink.report(
            IssueKind::NestedValue,
            path.as_str(),
            "Number token nests its value in an object; flatten it to a plain $value",
        );
        if !(inner.is_number() || inner.is_string()) {
            sink.report(
                IssueKind::NumberFormat,
                path.as_str(),
                format!("Nested number value {inner} should be numeric"),
            );
        }
        return;
    }

    match value {
        Value::Number(_) => {}
        Value::String(s) => {
            if !(NUMBER_PATTERN.is_match(s) || is_reference(s)) {
                sink.report(
                    IssueKind::NumberFormat,
                    path.as_str(),
                    format!("Number '{s}' should be numeric or a reference"),
                );
            }
        }
        other => sink.report(
            IssueKind::NumberFormat,
            path.as_str(),
            format!("Number value {other} should be numeric"),
        ),
    }
}

/// Quote strings, render everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}
