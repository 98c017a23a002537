//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`TokenPath`] - Dot-delimited address of a node in the token tree
//! - [`TokenType`] - Declared `$type` of a token
//! - [`SchemaProfile`] - Strict or permissive type vocabulary
//!
//! # Validation
//!
//! Paths supplied from outside the document (contrast pairs, config) are
//! validated at construction time. Paths built while walking a document are
//! derived from its keys and are always accepted.
//!
//! # Examples
//!
//! ```
//! use tokencheck::core::types::{SchemaProfile, TokenPath, TokenType};
//!
//! let path = TokenPath::new("color.primary").unwrap();
//! assert_eq!(path.child("hover").as_str(), "color.primary.hover");
//!
//! assert!(TokenPath::new("color..primary").is_err());
//!
//! let ty: TokenType = "opacity".parse().unwrap();
//! assert!(!SchemaProfile::Strict.recognizes(&ty));
//! assert!(SchemaProfile::Permissive.recognizes(&ty));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid token path: {0}")]
    InvalidPath(String),

    #[error("invalid schema profile: {0}")]
    InvalidProfile(String),

    #[error("invalid WCAG level: {0}")]
    InvalidLevel(String),
}

/// A dot-delimited path identifying a node in the token tree.
///
/// The root of the document is the empty path. Every issue and every
/// reference edge is addressed by a `TokenPath`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenPath(String);

impl TokenPath {
    /// Create a validated, non-root path.
    ///
    /// Surrounding reference braces are accepted and stripped, so
    /// `{color.primary}` and `color.primary` name the same node.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPath` if the path is empty, has an empty
    /// segment, or contains a brace or `$`-prefixed segment.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        let inner = path
            .strip_prefix('{')
            .and_then(|p| p.strip_suffix('}'))
            .unwrap_or(&path);

        if inner.is_empty() {
            return Err(TypeError::InvalidPath("path cannot be empty".into()));
        }
        if inner.contains('{') || inner.contains('}') {
            return Err(TypeError::InvalidPath(format!(
                "path cannot contain braces: '{inner}'"
            )));
        }
        for segment in inner.split('.') {
            if segment.is_empty() {
                return Err(TypeError::InvalidPath(format!(
                    "path has an empty segment: '{inner}'"
                )));
            }
            if segment.starts_with('$') {
                return Err(TypeError::InvalidPath(format!(
                    "path segment cannot start with '$': '{segment}'"
                )));
            }
        }

        Ok(Self(inner.to_string()))
    }

    /// The root path (empty).
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Build the path of a child node by appending a key.
    pub fn child(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{}", self.0, key))
        }
    }

    /// Iterate over the dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TokenPath {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self::root());
        }
        Self::new(value)
    }
}

impl From<TokenPath> for String {
    fn from(path: TokenPath) -> Self {
        path.0
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The declared `$type` of a token.
///
/// The standard DTCG vocabulary and the extended vocabulary accepted by the
/// permissive profile are closed variants. Anything else is carried verbatim
/// in [`TokenType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    Duration,
    CubicBezier,
    Number,
    Border,
    Transition,
    Shadow,
    Gradient,
    Typography,
    StrokeStyle,
    // Extended vocabulary
    Opacity,
    Spacing,
    Radius,
    Elevation,
    Motion,
    Layout,
    Interaction,
    String,
    Keyframes,
    /// A type outside both vocabularies.
    Other(std::string::String),
}

impl TokenType {
    /// The standard DTCG vocabulary, in canonical order.
    pub const STANDARD: &'static [TokenType] = &[
        TokenType::Color,
        TokenType::Dimension,
        TokenType::FontFamily,
        TokenType::FontWeight,
        TokenType::Duration,
        TokenType::CubicBezier,
        TokenType::Number,
        TokenType::Border,
        TokenType::Transition,
        TokenType::Shadow,
        TokenType::Gradient,
        TokenType::Typography,
        TokenType::StrokeStyle,
    ];

    /// Types accepted only by the permissive profile.
    pub const EXTENDED: &'static [TokenType] = &[
        TokenType::Opacity,
        TokenType::Spacing,
        TokenType::Radius,
        TokenType::Elevation,
        TokenType::Motion,
        TokenType::Layout,
        TokenType::Interaction,
        TokenType::String,
        TokenType::Keyframes,
    ];

    /// Get the `$type` spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::Duration => "duration",
            TokenType::CubicBezier => "cubicBezier",
            TokenType::Number => "number",
            TokenType::Border => "border",
            TokenType::Transition => "transition",
            TokenType::Shadow => "shadow",
            TokenType::Gradient => "gradient",
            TokenType::Typography => "typography",
            TokenType::StrokeStyle => "strokeStyle",
            TokenType::Opacity => "opacity",
            TokenType::Spacing => "spacing",
            TokenType::Radius => "radius",
            TokenType::Elevation => "elevation",
            TokenType::Motion => "motion",
            TokenType::Layout => "layout",
            TokenType::Interaction => "interaction",
            TokenType::String => "string",
            TokenType::Keyframes => "keyframes",
            TokenType::Other(raw) => raw,
        }
    }

    /// Whether this type belongs to the standard vocabulary.
    pub fn is_standard(&self) -> bool {
        Self::STANDARD.contains(self)
    }

    /// Whether this type belongs to the extended vocabulary.
    pub fn is_extended(&self) -> bool {
        Self::EXTENDED.contains(self)
    }
}

impl FromStr for TokenType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = Self::STANDARD
            .iter()
            .chain(Self::EXTENDED)
            .find(|t| t.as_str() == s)
            .cloned();
        Ok(known.unwrap_or_else(|| TokenType::Other(s.to_string())))
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which type vocabulary a schema accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaProfile {
    /// Standard DTCG types only.
    #[default]
    Strict,
    /// Standard plus extended types.
    Permissive,
}

impl SchemaProfile {
    /// Whether a declared type is known under this profile.
    pub fn recognizes(&self, ty: &TokenType) -> bool {
        match self {
            SchemaProfile::Strict => ty.is_standard(),
            SchemaProfile::Permissive => ty.is_standard() || ty.is_extended(),
        }
    }

    /// The vocabulary this profile accepts, as `$type` spellings.
    pub fn vocabulary(&self) -> Vec<&'static str> {
        let types: Vec<&TokenType> = match self {
            SchemaProfile::Strict => TokenType::STANDARD.iter().collect(),
            SchemaProfile::Permissive => TokenType::STANDARD
                .iter()
                .chain(TokenType::EXTENDED)
                .collect(),
        };
        types.into_iter().map(static_name).collect()
    }

    /// Get the profile name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaProfile::Strict => "strict",
            SchemaProfile::Permissive => "permissive",
        }
    }
}

fn static_name(ty: &'static TokenType) -> &'static str {
    ty.as_str()
}

impl FromStr for SchemaProfile {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(SchemaProfile::Strict),
            "permissive" => Ok(SchemaProfile::Permissive),
            other => Err(TypeError::InvalidProfile(format!(
                "'{other}', must be one of: strict, permissive"
            ))),
        }
    }
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod token_path {
        use super::*;

        #[test]
        fn valid_paths() {
            assert!(TokenPath::new("color").is_ok());
            assert!(TokenPath::new("color.primary.500").is_ok());
            assert!(TokenPath::new("spacing-scale.x_small").is_ok());
        }

        #[test]
        fn braces_are_stripped() {
            let path = TokenPath::new("{color.primary}").unwrap();
            assert_eq!(path.as_str(), "color.primary");
        }

        #[test]
        fn empty_rejected() {
            assert!(TokenPath::new("").is_err());
            assert!(TokenPath::new("{}").is_err());
        }

        #[test]
        fn empty_segment_rejected() {
            assert!(TokenPath::new("color..primary").is_err());
            assert!(TokenPath::new(".color").is_err());
            assert!(TokenPath::new("color.").is_err());
        }

        #[test]
        fn metadata_segment_rejected() {
            assert!(TokenPath::new("color.$value").is_err());
        }

        #[test]
        fn nested_braces_rejected() {
            assert!(TokenPath::new("{color.{primary}}").is_err());
        }

        #[test]
        fn child_of_root_has_no_leading_dot() {
            let root = TokenPath::root();
            assert!(root.is_root());
            assert_eq!(root.child("color").as_str(), "color");
            assert_eq!(root.child("color").child("primary").as_str(), "color.primary");
        }

        #[test]
        fn segments() {
            let path = TokenPath::new("a.b.c").unwrap();
            assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
            assert_eq!(TokenPath::root().segments().count(), 0);
        }

        #[test]
        fn serde_roundtrip() {
            let path = TokenPath::new("color.primary").unwrap();
            let json = serde_json::to_string(&path).unwrap();
            assert_eq!(json, "\"color.primary\"");
            let parsed: TokenPath = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, path);
        }

        #[test]
        fn serde_accepts_root() {
            let parsed: TokenPath = serde_json::from_str("\"\"").unwrap();
            assert!(parsed.is_root());
        }
    }

    mod token_type {
        use super::*;

        #[test]
        fn parses_standard_names() {
            assert_eq!("color".parse::<TokenType>().unwrap(), TokenType::Color);
            assert_eq!(
                "fontFamily".parse::<TokenType>().unwrap(),
                TokenType::FontFamily
            );
            assert_eq!(
                "strokeStyle".parse::<TokenType>().unwrap(),
                TokenType::StrokeStyle
            );
        }

        #[test]
        fn unknown_is_carried_verbatim() {
            let ty: TokenType = "sparkle".parse().unwrap();
            assert_eq!(ty, TokenType::Other("sparkle".to_string()));
            assert_eq!(ty.as_str(), "sparkle");
        }

        #[test]
        fn names_are_case_sensitive() {
            let ty: TokenType = "Color".parse().unwrap();
            assert!(matches!(ty, TokenType::Other(_)));
        }

        #[test]
        fn vocabularies_are_disjoint() {
            for ty in TokenType::STANDARD {
                assert!(!ty.is_extended(), "{ty} in both vocabularies");
            }
        }

        #[test]
        fn as_str_roundtrips() {
            for ty in TokenType::STANDARD.iter().chain(TokenType::EXTENDED) {
                assert_eq!(&ty.as_str().parse::<TokenType>().unwrap(), ty);
            }
        }
    }

    mod profile {
        use super::*;

        #[test]
        fn strict_recognizes_standard_only() {
            assert!(SchemaProfile::Strict.recognizes(&TokenType::Shadow));
            assert!(!SchemaProfile::Strict.recognizes(&TokenType::Spacing));
            assert!(!SchemaProfile::Strict.recognizes(&TokenType::Other("x".into())));
        }

        #[test]
        fn permissive_recognizes_extended() {
            assert!(SchemaProfile::Permissive.recognizes(&TokenType::Shadow));
            assert!(SchemaProfile::Permissive.recognizes(&TokenType::Keyframes));
            assert!(!SchemaProfile::Permissive.recognizes(&TokenType::Other("x".into())));
        }

        #[test]
        fn vocabulary_sizes() {
            assert_eq!(SchemaProfile::Strict.vocabulary().len(), 13);
            assert_eq!(SchemaProfile::Permissive.vocabulary().len(), 22);
        }

        #[test]
        fn parse_profile() {
            assert_eq!(
                "permissive".parse::<SchemaProfile>().unwrap(),
                SchemaProfile::Permissive
            );
            assert!("loose".parse::<SchemaProfile>().is_err());
        }
    }
}
