//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Configuration controls which schema profile the validator uses, an
//! optional custom JSON-Schema document, and contrast checking.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. The first config file found (see [`schema`] for search order)
//! 3. CLI flags (not handled here)
//!
//! # Example
//!
//! ```no_run
//! use tokencheck::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(None, Path::new(".")).unwrap();
//! let config = result.config;
//!
//! println!("Profile: {}", config.profile());
//! println!("Contrast: {}", config.contrast().is_some());
//! ```

pub mod schema;

pub use schema::{ContrastConfig, PairConfig, Settings, ValidatorConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::core::types::SchemaProfile;
use crate::validate::contrast::ContrastOptions;
use crate::validate::schema::Schema;
use crate::validate::ValidateOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TOKENCHECK_CONFIG";

/// File name searched for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tokencheck.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("failed to load schema '{path}': {message}")]
    SchemaError { path: PathBuf, message: String },
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The file that triggered the warning, if any.
    pub path: Option<PathBuf>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    settings: Settings,
    /// Path to the config file (if one was loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the first location that exists.
    ///
    /// `explicit` (from `--config`) must exist if given. Relative schema
    /// paths inside a config file are resolved against that file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated, or if `explicit` does not exist.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_with(explicit, env_path.as_deref(), cwd)
    }

    /// Like [`Config::load`], with the environment override passed in.
    pub fn load_with(
        explicit: Option<&Path>,
        env_path: Option<&Path>,
        cwd: &Path,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            let config = Self::from_file(path, &mut warnings)?;
            return Ok(ConfigLoadResult { config, warnings });
        }

        for path in Self::search_paths(env_path, cwd) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                let config = Self::from_file(&path, &mut warnings)?;
                return Ok(ConfigLoadResult { config, warnings });
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(ConfigLoadResult {
            config: Config::default(),
            warnings,
        })
    }

    /// Candidate config locations, in search order.
    pub fn search_paths(env_path: Option<&Path>, cwd: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = env_path {
            paths.push(path.to_path_buf());
        }
        paths.push(cwd.join(LOCAL_CONFIG_FILE));
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("tokencheck/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tokencheck/config.toml"));
        }
        paths
    }

    fn from_file(path: &Path, warnings: &mut Vec<ConfigWarning>) -> Result<Self, ConfigError> {
        let file = Self::read_config(path)?;
        let start = warnings.len();
        let mut settings = file.resolve(warnings)?;
        for warning in &mut warnings[start..] {
            warning.path.get_or_insert_with(|| path.to_path_buf());
        }

        let relative_to_file = match (&settings.schema_path, path.parent()) {
            (Some(schema), Some(dir)) if schema.is_relative() => Some(dir.join(schema)),
            _ => None,
        };
        if relative_to_file.is_some() {
            settings.schema_path = relative_to_file;
        }

        Ok(Self {
            settings,
            path: Some(path.to_path_buf()),
        })
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ValidatorConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the schema this configuration selects.
    ///
    /// A configured schema file is paired with the configured profile;
    /// otherwise the built-in schema for the profile is used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SchemaError` if the schema file cannot be read
    /// or is not valid JSON.
    pub fn load_schema(&self) -> Result<Schema, ConfigError> {
        let Some(path) = &self.settings.schema_path else {
            return Ok(Schema::builtin(self.profile()));
        };

        let schema_err = |message: String| ConfigError::SchemaError {
            path: path.clone(),
            message,
        };
        let contents = fs::read_to_string(path).map_err(|e| schema_err(e.to_string()))?;
        let document: Value =
            serde_json::from_str(&contents).map_err(|e| schema_err(e.to_string()))?;
        Ok(Schema::new(self.profile(), document))
    }

    /// Validation options for this configuration.
    ///
    /// # Errors
    ///
    /// Fails when a configured schema file cannot be loaded.
    pub fn to_options(&self) -> Result<ValidateOptions, ConfigError> {
        Ok(ValidateOptions {
            schema: Some(self.load_schema()?),
            contrast: self.settings.contrast.clone().into(),
        })
    }

    // =========================================================================
    // Accessors and overrides
    // =========================================================================

    /// Schema profile. Defaults to strict.
    pub fn profile(&self) -> SchemaProfile {
        self.settings.profile
    }

    /// Custom schema path, if configured.
    pub fn schema_path(&self) -> Option<&Path> {
        self.settings.schema_path.as_deref()
    }

    /// Contrast options, or `None` when contrast checking is off.
    pub fn contrast(&self) -> Option<&ContrastOptions> {
        self.settings.contrast.as_ref()
    }

    /// Override the profile (e.g. from a CLI flag).
    pub fn set_profile(&mut self, profile: SchemaProfile) {
        self.settings.profile = profile;
    }

    /// Override the schema path (e.g. from a CLI flag).
    pub fn set_schema_path(&mut self, path: PathBuf) {
        self.settings.schema_path = Some(path);
    }

    /// Override contrast settings (e.g. from a CLI flag).
    pub fn set_contrast(&mut self, contrast: Option<ContrastOptions>) {
        self.settings.contrast = contrast;
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
