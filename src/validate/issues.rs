//! validate::issues
//!
//! Issue model for validation results.
//!
//! # Architecture
//!
//! Every finding is a [`ValidationIssue`] with:
//! - A kind tag ([`IssueKind`]) naming the rule that fired
//! - A severity derived from the kind (errors invalidate, warnings never do)
//! - The path it applies to, and a human-readable message
//! - A stable [`IssueId`] computed from kind and path
//!
//! # Example
//!
//! ```
//! use tokencheck::validate::issues::{IssueKind, Severity, ValidationIssue};
//!
//! let issue = ValidationIssue::new(
//!     IssueKind::CircularReference,
//!     "color.primary",
//!     "Token cannot reference itself",
//! );
//! assert_eq!(issue.severity, Severity::Error);
//! assert_eq!(
//!     issue.to_string(),
//!     "[circular-reference] color.primary: Token cannot reference itself"
//! );
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Severity of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Makes the document invalid.
    Error,
    /// Reported, never affects validity.
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The rule that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    // Errors
    /// Document source is not valid JSON.
    Parse,
    /// Structural JSON-Schema violation.
    Schema,
    /// Self-reference or multi-token alias cycle.
    CircularReference,
    /// Type-specific violation or failed contrast check.
    Custom,

    // Warnings
    MissingType,
    Naming,
    NonStandardType,
    UnknownType,
    ColorFormat,
    DimensionFormat,
    NestedValue,
    NumberFormat,
    MissingValue,
}

impl IssueKind {
    /// Get the kebab-case tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Parse => "parse",
            IssueKind::Schema => "schema",
            IssueKind::CircularReference => "circular-reference",
            IssueKind::Custom => "custom",
            IssueKind::MissingType => "missing-type",
            IssueKind::Naming => "naming",
            IssueKind::NonStandardType => "non-standard-type",
            IssueKind::UnknownType => "unknown-type",
            IssueKind::ColorFormat => "color-format",
            IssueKind::DimensionFormat => "dimension-format",
            IssueKind::NestedValue => "nested-value",
            IssueKind::NumberFormat => "number-format",
            IssueKind::MissingValue => "missing-value",
        }
    }

    /// Get the severity of issues of this kind.
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::Parse
            | IssueKind::Schema
            | IssueKind::CircularReference
            | IssueKind::Custom => Severity::Error,
            IssueKind::MissingType
            | IssueKind::Naming
            | IssueKind::NonStandardType
            | IssueKind::UnknownType
            | IssueKind::ColorFormat
            | IssueKind::DimensionFormat
            | IssueKind::NestedValue
            | IssueKind::NumberFormat
            | IssueKind::MissingValue => Severity::Warning,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stable, deterministic issue identifier.
///
/// Formatted as `kind:hash(path)` where hash is a truncated SHA-256, so the
/// same problem at the same path has the same ID across runs.
///
/// # Example
///
/// ```
/// use tokencheck::validate::issues::{IssueId, IssueKind};
///
/// let id = IssueId::new(IssueKind::Custom, "size.small");
/// assert!(id.as_str().starts_with("custom:"));
/// assert_eq!(id.as_str().len(), "custom:".len() + 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueId(String);

impl IssueId {
    pub fn new(kind: IssueKind, key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = hasher.finalize();
        let short_hash = hex::encode(&hash[..4]); // 8 hex chars
        Self(format!("{}:{}", kind.as_str(), short_hash))
    }

    /// Get the string representation of the ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for IssueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub id: IssueId,
    pub severity: Severity,
    pub kind: IssueKind,
    /// Dot path of the node, or a cycle trace for alias cycles.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ValidationIssue {
    /// Create an issue with the kind's default severity.
    pub fn new(kind: IssueKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: IssueId::new(kind, &path),
            severity: kind.severity(),
            kind,
            path,
            message: message.into(),
            data: None,
        }
    }

    /// Attach a structured payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.path, self.message)
    }
}

/// Issues collected by one validation stage, split by severity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueSink {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl IssueSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue under its severity.
    pub fn push(&mut self, issue: ValidationIssue) {
        if issue.is_error() {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }

    /// Shorthand for `push(ValidationIssue::new(...))`.
    pub fn report(&mut self, kind: IssueKind, path: impl Into<String>, message: impl Into<String>) {
        self.push(ValidationIssue::new(kind, path, message));
    }

    /// Move all issues from `other` into this sink.
    pub fn extend(&mut self, other: IssueSink) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All issues, errors first.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }
}
