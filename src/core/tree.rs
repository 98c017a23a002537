//! core::tree
//!
//! Typed view of a design-token document.
//!
//! # Classification
//!
//! Every JSON object met during the walk is classified exactly once:
//!
//! - **Token**: has a `$value` property (with or without `$type`)
//! - **Group**: has a `$type` property and no `$value`
//! - **Unclassified**: any other object (a plain container)
//!
//! Keys starting with `$` are metadata and are never walked. Groups and
//! unclassified containers are descended into; tokens are leaves.
//!
//! # Invariants
//!
//! - The walk never mutates the document
//! - Visit order is depth-first, pre-order, following document key order

use serde_json::{Map, Value};

use super::graph::extract_reference;
use super::types::{TokenPath, TokenType};

/// Prefix marking metadata keys (`$value`, `$type`, ...).
pub const RESERVED_PREFIX: char = '$';

pub const VALUE_KEY: &str = "$value";
pub const TYPE_KEY: &str = "$type";
pub const DESCRIPTION_KEY: &str = "$description";

/// A leaf node carrying a value or an alias.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Token<'a> {
    /// The `$value`, or `None` when it is absent or `null`.
    pub fn value(&self) -> Option<&'a Value> {
        self.object.get(VALUE_KEY).filter(|v| !v.is_null())
    }

    /// The declared `$type`, if it is a string.
    pub fn token_type(&self) -> Option<TokenType> {
        declared_type(self.object)
    }

    /// The `$description`, if it is a string.
    pub fn description(&self) -> Option<&'a str> {
        self.object.get(DESCRIPTION_KEY).and_then(Value::as_str)
    }

    /// The aliased path when the value is exactly `{dot.path}`.
    pub fn reference(&self) -> Option<&'a str> {
        self.value().and_then(Value::as_str).and_then(extract_reference)
    }

    /// The raw JSON object backing this token.
    pub fn as_object(&self) -> &'a Map<String, Value> {
        self.object
    }
}

/// A container annotated with a default `$type` for its descendants.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Group<'a> {
    /// The group-level `$type`, if it is a string.
    pub fn token_type(&self) -> Option<TokenType> {
        declared_type(self.object)
    }

    /// The raw JSON object backing this group.
    pub fn as_object(&self) -> &'a Map<String, Value> {
        self.object
    }
}

/// A classified object node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Token(Token<'a>),
    Group(Group<'a>),
    Unclassified(&'a Map<String, Value>),
}

impl<'a> Node<'a> {
    /// Classify a JSON object.
    pub fn classify(object: &'a Map<String, Value>) -> Self {
        if object.contains_key(VALUE_KEY) {
            Node::Token(Token { object })
        } else if object.contains_key(TYPE_KEY) {
            Node::Group(Group { object })
        } else {
            Node::Unclassified(object)
        }
    }

    /// Whether child objects of this node are walked.
    fn is_container(&self) -> bool {
        !matches!(self, Node::Token(_))
    }

    fn object(&self) -> &'a Map<String, Value> {
        match self {
            Node::Token(t) => t.object,
            Node::Group(g) => g.object,
            Node::Unclassified(o) => o,
        }
    }
}

/// One step of the walk: a node and where it lives.
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    pub path: TokenPath,
    pub node: Node<'a>,
}

/// Walk a document depth-first, classifying every object node.
///
/// A non-object root yields nothing.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tokencheck::core::tree::{walk, Node};
///
/// let doc = json!({
///     "color": {
///         "$type": "color",
///         "primary": { "$value": "#ff0000" }
///     }
/// });
///
/// let visits = walk(&doc);
/// let paths: Vec<_> = visits.iter().map(|v| v.path.as_str()).collect();
/// assert_eq!(paths, vec!["", "color", "color.primary"]);
/// assert!(matches!(visits[1].node, Node::Group(_)));
/// assert!(matches!(visits[2].node, Node::Token(_)));
/// ```
pub fn walk(root: &Value) -> Vec<Visit<'_>> {
    let mut visits = Vec::new();
    let Some(object) = root.as_object() else {
        return visits;
    };

    let mut stack = vec![(TokenPath::root(), Node::classify(object))];
    while let Some((path, node)) = stack.pop() {
        if node.is_container() {
            let children: Vec<_> = child_objects(node.object())
                .map(|(key, child)| (path.child(key), Node::classify(child)))
                .collect();
            // Reverse so the first key is popped first.
            stack.extend(children.into_iter().rev());
        }
        tracing::trace!(path = %path, "visit");
        visits.push(Visit { path, node });
    }

    visits
}

/// Non-metadata children of an object whose values are themselves objects.
pub fn child_objects(
    object: &Map<String, Value>,
) -> impl Iterator<Item = (&String, &Map<String, Value>)> {
    object
        .iter()
        .filter(|(key, _)| !key.starts_with(RESERVED_PREFIX))
        .filter_map(|(key, value)| value.as_object().map(|o| (key, o)))
}

/// Look up the object node at `path`.
pub fn lookup<'a>(root: &'a Value, path: &TokenPath) -> Option<&'a Map<String, Value>> {
    let mut current = root.as_object()?;
    for segment in path.segments() {
        current = current.get(segment)?.as_object()?;
    }
    Some(current)
}

fn declared_type(object: &Map<String, Value>) -> Option<TokenType> {
    object
        .get(TYPE_KEY)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
}
