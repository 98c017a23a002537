//! validate::schema
//!
//! Structural schema pass and the default-schema slot.
//!
//! # Architecture
//!
//! Structural validation is delegated to a [`SchemaValidator`]. The default
//! implementation, [`JsonSchemaValidator`], runs any JSON-Schema document
//! through the `jsonschema` crate. Each violation becomes a `schema` error.
//!
//! A [`Schema`] pairs a JSON-Schema document with the [`SchemaProfile`]
//! that decides which `$type` vocabulary the semantic pass accepts.
//!
//! # Default schema
//!
//! Callers that do not pass a schema get the process-wide default
//! (built-in strict schema until [`set_default_schema`] is called).
//! The slot is guarded by a `RwLock`; last writer wins.

use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

use crate::core::types::SchemaProfile;

const STRICT_SCHEMA_SRC: &str = include_str!("../../schemas/strict.schema.json");
const PERMISSIVE_SCHEMA_SRC: &str = include_str!("../../schemas/permissive.schema.json");

static STRICT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(STRICT_SCHEMA_SRC).expect("built-in strict schema is valid JSON")
});

static PERMISSIVE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(PERMISSIVE_SCHEMA_SRC).expect("built-in permissive schema is valid JSON")
});

static DEFAULT_SCHEMA: Lazy<RwLock<Schema>> =
    Lazy::new(|| RwLock::new(Schema::builtin(SchemaProfile::Strict)));

/// Errors from schema compilation.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema: {0}")]
    Invalid(String),
}

/// A JSON-Schema document plus the type profile it implies.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    profile: SchemaProfile,
    document: Value,
}

impl Schema {
    /// Pair a schema document with a profile.
    pub fn new(profile: SchemaProfile, document: Value) -> Self {
        Self { profile, document }
    }

    /// The built-in schema for a profile.
    pub fn builtin(profile: SchemaProfile) -> Self {
        let document = match profile {
            SchemaProfile::Strict => STRICT_SCHEMA.clone(),
            SchemaProfile::Permissive => PERMISSIVE_SCHEMA.clone(),
        };
        Self { profile, document }
    }

    pub fn strict() -> Self {
        Self::builtin(SchemaProfile::Strict)
    }

    pub fn permissive() -> Self {
        Self::builtin(SchemaProfile::Permissive)
    }

    pub fn profile(&self) -> SchemaProfile {
        self.profile
    }

    pub fn document(&self) -> &Value {
        &self.document
    }
}

/// Replace the process-wide default schema.
pub fn set_default_schema(schema: Schema) {
    let mut slot = DEFAULT_SCHEMA
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = schema;
}

/// A copy of the process-wide default schema.
pub fn default_schema() -> Schema {
    DEFAULT_SCHEMA
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// One structural violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Dot path of the offending instance (empty for the root).
    pub instance_path: String,
    pub message: String,
}

/// Structural validator boundary.
///
/// Any JSON-Schema-compatible engine satisfies this.
pub trait SchemaValidator: Send + Sync {
    /// Validate `document` against `schema`, returning every violation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Invalid` if the schema itself cannot be compiled.
    fn validate(&self, schema: &Value, document: &Value)
        -> Result<Vec<SchemaViolation>, SchemaError>;
}

/// [`SchemaValidator`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(
        &self,
        schema: &Value,
        document: &Value,
    ) -> Result<Vec<SchemaViolation>, SchemaError> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| SchemaError::Invalid(e.to_string()))?;

        Ok(validator
            .iter_errors(document)
            .map(|e| SchemaViolation {
                instance_path: pointer_to_path(&e.instance_path.to_string()),
                message: e.to_string(),
            })
            .collect())
    }
}

/// Convert a JSON Pointer (`/color/primary`) to a dot path (`color.primary`).
pub fn pointer_to_path(pointer: &str) -> String {
    pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
