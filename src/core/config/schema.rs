//! core::config::schema
//!
//! Configuration file types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `--config <path>` on the command line
//! 2. `$TOKENCHECK_CONFIG` if set
//! 3. `./tokencheck.toml`
//! 4. `$XDG_CONFIG_HOME/tokencheck/config.toml`
//! 5. `~/.tokencheck/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing and converted into typed settings
//! (profile, WCAG levels, color sources). Unknown keys are rejected.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigWarning};
use crate::core::types::SchemaProfile;
use crate::validate::contrast::{ColorSource, ContrastOptions, ContrastPair, WcagLevel};

/// Validator configuration file.
///
/// # Example
///
/// ```toml
/// profile = "permissive"
/// schema = "schemas/tokens.schema.json"
///
/// [contrast]
/// enabled = true
/// level = "AA_NORMAL"
///
/// [[contrast.pairs]]
/// foreground = "color.text.primary"
/// background = "color.background.primary"
/// context = "body text"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Schema profile ("strict" or "permissive")
    pub profile: Option<String>,

    /// Path to a custom JSON-Schema document
    pub schema: Option<PathBuf>,

    /// Contrast checking settings
    pub contrast: Option<ContrastConfig>,
}

/// `[contrast]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ContrastConfig {
    /// Run contrast checks
    pub enabled: Option<bool>,

    /// Default WCAG level for pairs without their own
    pub level: Option<String>,

    /// Explicit pairs; when empty, pairs are derived from the document
    pub pairs: Option<Vec<PairConfig>>,
}

/// One `[[contrast.pairs]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PairConfig {
    /// Token path or literal hex color
    pub foreground: String,

    /// Token path or literal hex color
    pub background: String,

    /// Where the pair is used
    #[serde(default)]
    pub context: Option<String>,

    /// Overrides the table-level WCAG level
    #[serde(default)]
    pub level: Option<String>,
}

/// Typed settings produced from a validated [`ValidatorConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub profile: SchemaProfile,
    pub schema_path: Option<PathBuf>,
    /// `None` when contrast checking is disabled.
    pub contrast: Option<ContrastOptions>,
}

impl ValidatorConfig {
    /// Validate the configuration and convert it to typed settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn resolve(&self, warnings: &mut Vec<ConfigWarning>) -> Result<Settings, ConfigError> {
        let profile = match &self.profile {
            Some(p) => p
                .parse::<SchemaProfile>()
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?,
            None => SchemaProfile::default(),
        };

        if let Some(schema) = &self.schema {
            if schema.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "schema path cannot be empty".to_string(),
                ));
            }
        }

        let contrast = match &self.contrast {
            Some(c) => c.resolve(warnings)?,
            None => None,
        };

        Ok(Settings {
            profile,
            schema_path: self.schema.clone(),
            contrast,
        })
    }
}

impl ContrastConfig {
    fn resolve(
        &self,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<Option<ContrastOptions>, ConfigError> {
        let level = match &self.level {
            Some(l) => parse_level(l)?,
            None => WcagLevel::default(),
        };

        let mut color_pairs = Vec::new();
        for pair in self.pairs.iter().flatten() {
            color_pairs.push(pair.resolve(level)?);
        }

        if self.enabled == Some(false) {
            if !color_pairs.is_empty() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "{} contrast pair(s) configured but contrast checking is disabled",
                        color_pairs.len()
                    ),
                    path: None,
                });
            }
            return Ok(None);
        }

        Ok(Some(ContrastOptions { level, color_pairs }))
    }
}

impl PairConfig {
    fn resolve(&self, default_level: WcagLevel) -> Result<ContrastPair, ConfigError> {
        let source = |s: &str, side: &str| {
            s.parse::<ColorSource>().map_err(|e| {
                ConfigError::InvalidValue(format!("invalid contrast {side} '{s}': {e}"))
            })
        };

        let required_level = match &self.level {
            Some(l) => parse_level(l)?,
            None => default_level,
        };

        Ok(ContrastPair {
            foreground: source(&self.foreground, "foreground")?,
            background: source(&self.background, "background")?,
            context: self.context.clone(),
            required_level,
        })
    }
}

fn parse_level(level: &str) -> Result<WcagLevel, ConfigError> {
    level
        .parse()
        .map_err(|e: crate::core::types::TypeError| ConfigError::InvalidValue(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(toml_src: &str) -> Result<Settings, ConfigError> {
        let config: ValidatorConfig = toml::from_str(toml_src).unwrap();
        config.resolve(&mut Vec::new())
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = resolve("").unwrap();
        assert_eq!(settings.profile, SchemaProfile::Strict);
        assert!(settings.schema_path.is_none());
        assert!(settings.contrast.is_none());
    }

    #[test]
    fn profile_parsed() {
        let settings = resolve(r#"profile = "permissive""#).unwrap();
        assert_eq!(settings.profile, SchemaProfile::Permissive);
    }

    #[test]
    fn invalid_profile_rejected() {
        let err = resolve(r#"profile = "lenient""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn contrast_table_enables_checks() {
        let settings = resolve(
            r#"
            [contrast]
            level = "AAA_NORMAL"
            "#,
        )
        .unwrap();
        let contrast = settings.contrast.unwrap();
        assert_eq!(contrast.level, WcagLevel::AaaNormal);
        assert!(contrast.color_pairs.is_empty());
    }

    #[test]
    fn pairs_inherit_table_level() {
        let settings = resolve(
            r##"
            [contrast]
            level = "AA_LARGE"

            [[contrast.pairs]]
            foreground = "color.text"
            background = "#ffffff"

            [[contrast.pairs]]
            foreground = "{color.link}"
            background = "color.bg"
            level = "AAA_NORMAL"
            context = "links"
            "##,
        )
        .unwrap();
        let pairs = settings.contrast.unwrap().color_pairs;
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].required_level, WcagLevel::AaLarge);
        assert_eq!(pairs[0].background, ColorSource::Literal("#ffffff".into()));
        assert_eq!(pairs[1].required_level, WcagLevel::AaaNormal);
        assert_eq!(pairs[1].context.as_deref(), Some("links"));
    }

    #[test]
    fn invalid_level_rejected() {
        let err = resolve(
            r#"
            [contrast]
            level = "AA"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("AA"));
    }

    #[test]
    fn invalid_pair_source_rejected() {
        let result = resolve(
            r##"
            [[contrast.pairs]]
            foreground = "color..text"
            background = "#fff"
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn disabled_contrast_with_pairs_warns() {
        let config: ValidatorConfig = toml::from_str(
            r##"
            [contrast]
            enabled = false

            [[contrast.pairs]]
            foreground = "#000"
            background = "#fff"
            "##,
        )
        .unwrap();
        let mut warnings = Vec::new();
        let settings = config.resolve(&mut warnings).unwrap();
        assert!(settings.contrast.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<ValidatorConfig, _> = toml::from_str("strictness = 3");
        assert!(result.is_err());
    }
}
