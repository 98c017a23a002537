//! validate
//!
//! The validation pipeline.
//!
//! # Architecture
//!
//! ```text
//! parse ─▶ schema ─▶ walk ─┬─▶ semantic rules ──────┐
//!                          └─▶ reference edges ─▶ cycles ─▶ is_valid ─▶ contrast
//! ```
//!
//! Every stage runs to completion and reports into one [`ValidationResult`].
//! Only malformed JSON short-circuits, and only in [`validate_str`].
//!
//! # Modules
//!
//! - [`issues`] - Issue kinds, severities and stable IDs
//! - [`schema`] - Structural JSON-Schema pass and the default-schema slot
//! - [`semantic`] - Per-`$type` rules
//! - [`contrast`] - WCAG contrast checks
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tokencheck::validate::{validate, ValidateOptions};
//!
//! let doc = json!({
//!     "color": {
//!         "primary": { "$type": "color", "$value": "{color.primary}" }
//!     }
//! });
//!
//! let result = validate(&doc, &ValidateOptions::default());
//! assert!(!result.is_valid);
//! assert_eq!(result.errors[0].message, "Token cannot reference itself");
//! ```

pub mod contrast;
pub mod issues;
pub mod schema;
pub mod semantic;

use serde::Serialize;
use serde_json::{json, Value};

use crate::core::graph::ReferenceGraph;
use crate::core::tree::{walk, Node};
use crate::core::types::TokenPath;
use contrast::{check_contrast, ContrastOptions, ContrastReport};
use issues::{IssueKind, IssueSink, ValidationIssue};
use schema::{default_schema, JsonSchemaValidator, Schema, SchemaValidator};
use semantic::SemanticValidator;

/// Whether and how to run contrast checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ContrastValidation {
    #[default]
    Off,
    /// AA_NORMAL over pairs derived from the document.
    Default,
    /// Caller-supplied level and pairs.
    With(ContrastOptions),
}

impl ContrastValidation {
    /// Options to run with, or `None` when off.
    pub fn options(&self) -> Option<ContrastOptions> {
        match self {
            ContrastValidation::Off => None,
            ContrastValidation::Default => Some(ContrastOptions::default()),
            ContrastValidation::With(options) => Some(options.clone()),
        }
    }
}

impl From<bool> for ContrastValidation {
    fn from(enabled: bool) -> Self {
        if enabled {
            ContrastValidation::Default
        } else {
            ContrastValidation::Off
        }
    }
}

impl From<ContrastOptions> for ContrastValidation {
    fn from(options: ContrastOptions) -> Self {
        ContrastValidation::With(options)
    }
}

impl From<Option<ContrastOptions>> for ContrastValidation {
    fn from(options: Option<ContrastOptions>) -> Self {
        options.map_or(ContrastValidation::Off, ContrastValidation::With)
    }
}

/// Per-call options for [`validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateOptions {
    /// Overrides the default schema for this call.
    pub schema: Option<Schema>,
    pub contrast: ContrastValidation,
}

impl ValidateOptions {
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_contrast(mut self, contrast: impl Into<ContrastValidation>) -> Self {
        self.contrast = contrast.into();
        self
    }
}

/// Aggregate result of one validation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` iff there are no errors.
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Present iff contrast checks ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<ContrastReport>,
}

impl ValidationResult {
    fn from_sink(sink: IssueSink) -> Self {
        Self {
            is_valid: !sink.has_errors(),
            errors: sink.errors,
            warnings: sink.warnings,
            contrast: None,
        }
    }

    /// Result for input that is not valid JSON.
    pub fn parse_failure(message: impl Into<String>) -> Self {
        let mut sink = IssueSink::new();
        sink.report(IssueKind::Parse, "", message);
        Self::from_sink(sink)
    }

    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }
}

/// A validator bound to one schema.
///
/// Prefer this over the default-schema slot when several threads validate
/// with different schemas.
pub struct Validator {
    schema: Schema,
    engine: Box<dyn SchemaValidator>,
}

impl Validator {
    /// Validator using the `jsonschema` engine.
    pub fn new(schema: Schema) -> Self {
        Self::with_engine(schema, Box::new(JsonSchemaValidator))
    }

    /// Validator using a custom structural engine.
    pub fn with_engine(schema: Schema, engine: Box<dyn SchemaValidator>) -> Self {
        Self { schema, engine }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a parsed document.
    pub fn validate(&self, document: &Value, contrast: &ContrastValidation) -> ValidationResult {
        let mut sink = IssueSink::new();

        self.check_structure(document, &mut sink);
        check_tokens(document, SemanticValidator::new(self.schema.profile()), &mut sink);

        let mut result = ValidationResult::from_sink(sink);

        if let Some(options) = contrast.options() {
            let report = check_contrast(document, &options);
            let failures: Vec<_> = report.failures().map(|r| r.to_issue()).collect();
            if !failures.is_empty() {
                result.errors.extend(failures);
                result.is_valid = false;
            }
            result.contrast = Some(report);
        }

        tracing::debug!(
            valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validation finished"
        );
        result
    }

    fn check_structure(&self, document: &Value, sink: &mut IssueSink) {
        match self.engine.validate(self.schema.document(), document) {
            Ok(violations) => {
                tracing::debug!(violations = violations.len(), "schema pass");
                for v in violations {
                    sink.report(IssueKind::Schema, v.instance_path, v.message);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "schema could not be compiled");
                sink.report(IssueKind::Schema, "", e.to_string());
            }
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("profile", &self.schema.profile())
            .finish_non_exhaustive()
    }
}

/// Semantic rules plus alias cycle detection over every node.
fn check_tokens(document: &Value, semantic: SemanticValidator, sink: &mut IssueSink) {
    let mut graph = ReferenceGraph::new();
    let visits = walk(document);

    for visit in &visits {
        semantic.check(visit, sink);

        let Node::Token(token) = &visit.node else {
            continue;
        };
        let Some(target) = token.reference() else {
            continue;
        };
        if target == visit.path.as_str() {
            sink.report(
                IssueKind::CircularReference,
                visit.path.as_str(),
                "Token cannot reference itself",
            );
            continue;
        }
        match TokenPath::new(target) {
            Ok(to) => graph.add_edge(visit.path.clone(), to),
            Err(e) => tracing::debug!(path = %visit.path, error = %e, "unusable reference"),
        }
    }

    let cycles = graph.find_cycles();
    tracing::debug!(
        nodes = visits.len(),
        edges = graph.edge_count(),
        cycles = cycles.len(),
        "tokens checked"
    );

    for cycle in cycles {
        let paths: Vec<&str> = cycle.paths().iter().map(TokenPath::as_str).collect();
        sink.push(
            ValidationIssue::new(
                IssueKind::CircularReference,
                cycle.trace(),
                "Circular reference detected",
            )
            .with_data(json!({ "cycle": paths })),
        );
    }
}

/// Validate a parsed document.
///
/// Uses `options.schema`, or the process-wide default schema when unset.
pub fn validate(document: &Value, options: &ValidateOptions) -> ValidationResult {
    let schema = options.schema.clone().unwrap_or_else(default_schema);
    Validator::new(schema).validate(document, &options.contrast)
}

/// Parse and validate a JSON document.
///
/// Malformed JSON yields a single `parse` error and nothing else runs.
pub fn validate_str(source: &str, options: &ValidateOptions) -> ValidationResult {
    match serde_json::from_str::<Value>(source) {
        Ok(document) => validate(&document, options),
        Err(e) => {
            tracing::debug!(error = %e, "document did not parse");
            ValidationResult::parse_failure(format!("Invalid JSON: {e}"))
        }
    }
}
