//! Configuration types for matchergen.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::synth::Packages;

/// Top-level configuration, read from `matchergen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation defaults.
    #[serde(default)]
    pub generate: GenerateConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Defaults for a generation run. Command-line flags take precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Module the generated file imports target types from.
    #[serde(default = "default_source_module")]
    pub source_module: String,

    /// Path of the comparator runtime crate as seen from the generated file.
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Suffix appended to the lower-cased first type name for the default
    /// output file name.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Features enabled while evaluating `#[cfg]` attributes.
    #[serde(default)]
    pub features: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            source_module: default_source_module(),
            runtime: default_runtime(),
            suffix: default_suffix(),
            features: Vec::new(),
        }
    }
}

impl GenerateConfig {
    /// Parses the configured module paths.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is not a valid Rust path.
    pub fn packages(&self) -> Result<Packages, ConfigError> {
        parse_packages(&self.source_module, &self.runtime)
    }
}

/// Parses the source module and runtime paths.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPath`] naming the offending value.
pub fn parse_packages(source_module: &str, runtime: &str) -> Result<Packages, ConfigError> {
    let parse = |value: &str| {
        syn::parse_str::<syn::Path>(value).map_err(|e| ConfigError::InvalidPath {
            value: value.to_string(),
            message: e.to_string(),
        })
    };
    Ok(Packages::new(parse(source_module)?, parse(runtime)?))
}

fn default_source_module() -> String {
    "super".to_string()
}

fn default_runtime() -> String {
    "matchergen_runtime".to_string()
}

fn default_suffix() -> String {
    "_matcher.rs".to_string()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(matchergen::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(matchergen::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// No target type names were given.
    #[error("no type names given")]
    #[diagnostic(code(matchergen::config::no_types), help("pass --type T1,T2"))]
    NoTypeNames,

    /// A target type name is not a Rust identifier.
    #[error("invalid type name `{name}`")]
    #[diagnostic(code(matchergen::config::invalid_type))]
    InvalidTypeName {
        /// The rejected name.
        name: String,
    },

    /// Features were combined with an explicit file list.
    #[error("--tags applies only to directories, not when files are specified")]
    #[diagnostic(code(matchergen::config::features_with_files))]
    FeaturesWithFiles,

    /// A configured module path is not a valid Rust path.
    #[error("invalid module path `{value}`: {message}")]
    #[diagnostic(code(matchergen::config::invalid_path))]
    InvalidPath {
        /// The rejected value.
        value: String,
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generate.source_module, "super");
        assert_eq!(config.generate.runtime, "matchergen_runtime");
        assert_eq!(config.generate.suffix, "_matcher.rs");
        assert!(config.generate.features.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[generate]
source_module = "crate::model"
features = ["serde"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.generate.source_module, "crate::model");
        assert_eq!(config.generate.runtime, "matchergen_runtime");
        assert_eq!(config.generate.features, vec!["serde"]);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").expect("Failed to parse");
        assert_eq!(config.generate.suffix, "_matcher.rs");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("[generate]\nfeatures = 3\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_packages_from_config() {
        let generate = GenerateConfig {
            source_module: "crate::model".to_string(),
            ..GenerateConfig::default()
        };
        let packages = generate.packages().expect("valid paths");
        let expected: syn::Path = syn::parse_quote!(crate::model);
        assert_eq!(packages.source_module, expected);
    }

    #[test]
    fn test_invalid_module_path() {
        let result = parse_packages("crate::", "matchergen_runtime");
        assert!(matches!(result, Err(ConfigError::InvalidPath { value, .. }) if value == "crate::"));
    }
}
