//! tokencheck - Semantic validator for DTCG design-token documents
//!
//! tokencheck checks a design-token tree against a JSON-Schema, applies
//! per-`$type` semantic rules, detects circular alias references, and
//! optionally scores foreground/background color pairs against WCAG
//! contrast thresholds.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, owns file I/O)
//! - [`validate`] - The validation pipeline and its stages
//! - [`core`] - Domain types, tree walk, reference graph, colorimetry, config
//! - [`ui`] - Output and report formatting
//!
//! # Correctness Invariants
//!
//! 1. Validation never mutates the document and is deterministic
//! 2. Warnings never affect validity
//! 3. Every stage runs to completion; only malformed JSON short-circuits
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tokencheck::{validate, ValidateOptions};
//!
//! let doc = json!({
//!     "color": {
//!         "red": { "$type": "color", "$value": { "colorSpace": "srgb", "components": [1, 0, 0] } }
//!     }
//! });
//! let result = validate(&doc, &ValidateOptions::default());
//! assert!(result.is_valid);
//! ```

pub mod cli;
pub mod core;
pub mod ui;
pub mod validate;

pub use crate::core::color::{contrast_ratio_hex, hex_to_rgb, structured_color_to_hex};
pub use crate::core::types::{SchemaProfile, TokenPath, TokenType};
pub use crate::validate::contrast::{ContrastOptions, ContrastPair, ContrastReport, WcagLevel};
pub use crate::validate::issues::{IssueKind, Severity, ValidationIssue};
pub use crate::validate::schema::{default_schema, set_default_schema, Schema};
pub use crate::validate::{
    validate, validate_str, ContrastValidation, ValidateOptions, ValidationResult, Validator,
};
