//! validate::contrast
//!
//! WCAG contrast checks between color tokens.
//!
//! # Architecture
//!
//! A [`ContrastPair`] names two [`ColorSource`]s and a [`WcagLevel`]. Pairs
//! come from the caller or, when none are given, are derived from
//! conventional `foreground` / `background` groups in the document.
//!
//! Each pair is resolved to two sRGB colors. Pairs where either side cannot
//! be resolved are skipped: they count as neither a pass nor a fail.
//!
//! # Invariants
//!
//! - `valid_pairs + invalid_pairs == total_pairs`
//! - Every failing result carries a suggestion

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use super::issues::{IssueKind, ValidationIssue};
use crate::core::color::{contrast_ratio, hex_to_rgb, resolve_color, Rgb};
use crate::core::tree::{child_objects, lookup, Node};
use crate::core::types::{TokenPath, TypeError};

/// WCAG 2.1 conformance level and text size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WcagLevel {
    /// AA, normal text.
    #[default]
    AaNormal,
    /// AA, large text (18pt, or 14pt bold).
    AaLarge,
    /// AAA, normal text.
    AaaNormal,
    /// AAA, large text.
    AaaLarge,
}

impl WcagLevel {
    pub const ALL: [WcagLevel; 4] = [
        WcagLevel::AaNormal,
        WcagLevel::AaLarge,
        WcagLevel::AaaNormal,
        WcagLevel::AaaLarge,
    ];

    /// Minimum contrast ratio for this level.
    pub fn required_ratio(&self) -> f64 {
        match self {
            WcagLevel::AaNormal => 4.5,
            WcagLevel::AaLarge => 3.0,
            WcagLevel::AaaNormal => 7.0,
            WcagLevel::AaaLarge => 4.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WcagLevel::AaNormal => "AA_NORMAL",
            WcagLevel::AaLarge => "AA_LARGE",
            WcagLevel::AaaNormal => "AAA_NORMAL",
            WcagLevel::AaaLarge => "AAA_LARGE",
        }
    }
}

impl FromStr for WcagLevel {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                TypeError::InvalidLevel(format!(
                    "'{s}', must be one of: AA_NORMAL, AA_LARGE, AAA_NORMAL, AAA_LARGE"
                ))
            })
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where one side of a pair gets its color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorSource {
    /// A token in the document, followed through aliases.
    Token(TokenPath),
    /// A literal hex color.
    Literal(String),
}

impl FromStr for ColorSource {
    type Err = TypeError;

    /// `#...` is a literal; anything else must be a token path, with or
    /// without reference braces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('#') {
            Ok(ColorSource::Literal(s.to_string()))
        } else {
            TokenPath::new(s).map(ColorSource::Token)
        }
    }
}

impl fmt::Display for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSource::Token(path) => write!(f, "{path}"),
            ColorSource::Literal(hex) => write!(f, "{hex}"),
        }
    }
}

impl Serialize for ColorSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Two colors that must meet a WCAG level against each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastPair {
    pub foreground: ColorSource,
    pub background: ColorSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub required_level: WcagLevel,
}

impl ContrastPair {
    pub fn new(foreground: ColorSource, background: ColorSource, level: WcagLevel) -> Self {
        Self {
            foreground,
            background,
            context: None,
            required_level: level,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Outcome of one resolved pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    pub pair: ContrastPair,
    pub computed_ratio: f64,
    pub required_ratio: f64,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ContrastResult {
    /// The `custom` error reported for a failing pair.
    pub fn to_issue(&self) -> ValidationIssue {
        let context = self
            .pair
            .context
            .as_ref()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        ValidationIssue::new(
            IssueKind::Custom,
            self.pair.foreground.to_string(),
            format!(
                "Contrast ratio {:.2}:1 against {} is below {} ({}:1){}",
                self.computed_ratio,
                self.pair.background,
                self.pair.required_level,
                self.required_ratio,
                context
            ),
        )
        .with_data(json!({
            "ratio": self.computed_ratio,
            "required": self.required_ratio,
            "foreground": self.pair.foreground.to_string(),
            "background": self.pair.background.to_string(),
        }))
    }
}

/// Aggregate of all resolved pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    pub total_pairs: usize,
    pub valid_pairs: usize,
    pub invalid_pairs: usize,
    pub results: Vec<ContrastResult>,
}

impl ContrastReport {
    pub fn failures(&self) -> impl Iterator<Item = &ContrastResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// What to check and at which default level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContrastOptions {
    /// Level used for derived pairs.
    pub level: WcagLevel,
    /// Explicit pairs; when empty, pairs are derived from the document.
    pub color_pairs: Vec<ContrastPair>,
}

impl ContrastOptions {
    pub fn with_level(level: WcagLevel) -> Self {
        Self {
            level,
            color_pairs: Vec::new(),
        }
    }
}

/// Run contrast checks over a document.
pub fn check_contrast(document: &Value, options: &ContrastOptions) -> ContrastReport {
    let pairs = if options.color_pairs.is_empty() {
        derive_pairs(document, options.level)
    } else {
        options.color_pairs.clone()
    };

    let results: Vec<ContrastResult> = pairs
        .into_iter()
        .filter_map(|pair| check_pair(document, pair))
        .collect();
    let valid_pairs = results.iter().filter(|r| r.passed).count();

    tracing::debug!(
        pairs = results.len(),
        passed = valid_pairs,
        "contrast checked"
    );

    ContrastReport {
        total_pairs: results.len(),
        valid_pairs,
        invalid_pairs: results.len() - valid_pairs,
        results,
    }
}

/// Resolve and score one pair, or `None` if either side does not resolve.
pub fn check_pair(document: &Value, pair: ContrastPair) -> Option<ContrastResult> {
    let Some(fg) = resolve_source(document, &pair.foreground) else {
        tracing::debug!(source = %pair.foreground, "foreground unresolved, pair skipped");
        return None;
    };
    let Some(bg) = resolve_source(document, &pair.background) else {
        tracing::debug!(source = %pair.background, "background unresolved, pair skipped");
        return None;
    };

    let computed_ratio = contrast_ratio(fg, bg);
    let required_ratio = pair.required_level.required_ratio();
    let passed = computed_ratio >= required_ratio;
    let suggestion = (!passed).then(|| suggestion(computed_ratio, required_ratio));

    Some(ContrastResult {
        pair,
        computed_ratio,
        required_ratio,
        passed,
        suggestion,
    })
}

/// "increase contrast by ~N%", N being how far the ratio falls short.
pub fn suggestion(actual: f64, required: f64) -> String {
    let percent = ((required / actual) * 100.0 - 100.0).round();
    format!("increase contrast by ~{percent:.0}%")
}

/// Derive pairs from `foreground` / `background` groups.
///
/// Looks at the document root and under `color`. Each foreground token
/// `k` is paired with `background.k`, or else `background.primary`, or
/// else `background.default`. Yields nothing when the groups are absent.
pub fn derive_pairs(document: &Value, level: WcagLevel) -> Vec<ContrastPair> {
    let mut pairs = Vec::new();

    for base in [TokenPath::root(), TokenPath::root().child("color")] {
        let fg_path = base.child("foreground");
        let bg_path = base.child("background");
        let (Some(fg_group), Some(bg_group)) =
            (lookup(document, &fg_path), lookup(document, &bg_path))
        else {
            continue;
        };

        let is_token = |key: &str| {
            bg_group
                .get(key)
                .and_then(Value::as_object)
                .is_some_and(|o| matches!(Node::classify(o), Node::Token(_)))
        };

        for (key, child) in child_objects(fg_group) {
            if !matches!(Node::classify(child), Node::Token(_)) {
                continue;
            }
            let Some(bg_key) = [key.as_str(), "primary", "default"]
                .into_iter()
                .find(|k| is_token(k))
            else {
                continue;
            };
            pairs.push(
                ContrastPair::new(
                    ColorSource::Token(fg_path.child(key)),
                    ColorSource::Token(bg_path.child(bg_key)),
                    level,
                )
                .with_context(format!("{key} text")),
            );
        }
    }

    tracing::debug!(pairs = pairs.len(), "derived contrast pairs");
    pairs
}

/// Resolve a color source to RGB, following alias chains.
pub fn resolve_source(document: &Value, source: &ColorSource) -> Option<Rgb> {
    match source {
        ColorSource::Literal(hex) => hex_to_rgb(hex),
        ColorSource::Token(path) => resolve_token(document, path),
    }
}

fn resolve_token(document: &Value, path: &TokenPath) -> Option<Rgb> {
    let mut seen = HashSet::new();
    let mut current = path.clone();

    loop {
        if !seen.insert(current.clone()) {
            // alias cycle; reported elsewhere
            return None;
        }
        let Node::Token(token) = Node::classify(lookup(document, &current)?) else {
            return None;
        };
        match token.reference() {
            Some(target) => current = TokenPath::new(target).ok()?,
            None => return resolve_color(token.value()?),
        }
    }
}
