//! Documenter configuration.
//!
//! Handles loading, validating, and overriding `api-pages.toml`. Every option
//! has a default, so the file itself is optional. Command-line flags are
//! applied as one more TOML layer on top of the file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "/"                  # Prefix of every generated link
//! newline = "os"                  # "lf", "crlf" or "os"
//! show_inherited_members = false  # List inherited members on class pages
//! signature_language = "typescript"
//!
//! [front_matter]                  # Extra keys added to every page
//! type = "docs"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "api-pages.toml";

/// Front-matter keys written by the documenter itself.
pub const RESERVED_FRONT_MATTER_KEYS: &[&str] = &["title", "linkTitle", "description"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Line ending of generated pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    Lf,
    Crlf,
    /// The host platform's convention.
    #[default]
    Os,
}

impl Newline {
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::Crlf => "\r\n",
            Newline::Os if cfg!(windows) => "\r\n",
            Newline::Os => "\n",
        }
    }
}

/// Documenter configuration loaded from `api-pages.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumenterConfig {
    /// Prefix of every link URL. Must end with `/`.
    pub base_url: String,
    pub newline: Newline,
    /// List members inherited from base types on class and interface pages.
    pub show_inherited_members: bool,
    /// Language tag of signature code blocks.
    pub signature_language: String,
    /// Extra front-matter keys, written after the built-in ones in key order.
    pub front_matter: BTreeMap<String, String>,
}

impl Default for DocumenterConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            newline: Newline::default(),
            show_inherited_members: false,
            signature_language: "typescript".to_string(),
            front_matter: BTreeMap::new(),
        }
    }
}

impl DocumenterConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".into()));
        }
        if self.base_url.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "base_url must not contain whitespace".into(),
            ));
        }
        if !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must end with '/'".into(),
            ));
        }
        if self.signature_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "signature_language must not be empty".into(),
            ));
        }
        if let Some(key) = self
            .front_matter
            .keys()
            .find(|k| RESERVED_FRONT_MATTER_KEYS.contains(&k.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "front_matter.{key} is set by the documenter and cannot be overridden"
            )));
        }
        Ok(())
    }
}

/// Command-line values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub newline: Option<Newline>,
    pub show_inherited_members: Option<bool>,
}

impl ConfigOverrides {
    /// The overrides as a sparse TOML table.
    pub fn to_toml(&self) -> Result<toml::Value, ConfigError> {
        let mut table = toml::Table::new();
        if let Some(base_url) = &self.base_url {
            table.insert("base_url".into(), toml::Value::String(base_url.clone()));
        }
        if let Some(newline) = self.newline {
            table.insert("newline".into(), toml::Value::try_from(newline)?);
        }
        if let Some(show) = self.show_inherited_members {
            table.insert("show_inherited_members".into(), toml::Value::Boolean(show));
        }
        Ok(toml::Value::Table(table))
    }
}

/// Returns the default config as a `toml::Value::Table`, the base layer
/// user values are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(DocumenterConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge layers onto the stock defaults in order, then deserialize and validate.
pub fn resolve_config(
    layers: impl IntoIterator<Item = toml::Value>,
) -> Result<DocumenterConfig, ConfigError> {
    let merged = layers
        .into_iter()
        .fold(stock_defaults_value()?, merge_toml);
    let config: DocumenterConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` (defaults if missing) and apply `overrides`.
pub fn load_config(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<DocumenterConfig, ConfigError> {
    let file = load_raw_config(path)?;
    resolve_config(file.into_iter().chain([overrides.to_toml()?]))
}

/// Returns a fully-commented stock `api-pages.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# api-pages Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Prefix of every link between pages. Use the path the site is served under,
# for example "/docs/api/". Must end with a slash.
base_url = "/"

# Line ending of the generated files: "lf", "crlf", or "os" for the
# convention of the machine running the documenter.
newline = "os"

# List members inherited from base classes and interfaces in the member
# tables of class and interface pages.
show_inherited_members = false

# Language tag of the fenced code block holding each item's signature.
signature_language = "typescript"

# ---------------------------------------------------------------------------
# Front matter
# ---------------------------------------------------------------------------
# Extra string keys added to the front matter of every page, after the
# built-in title, linkTitle and description keys. Those three are reserved.
[front_matter]
# type = "docs"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = DocumenterConfig::default();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.newline, Newline::Os);
        assert!(!config.show_inherited_members);
        assert_eq!(config.signature_language, "typescript");
        assert!(config.front_matter.is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let config: DocumenterConfig = toml::from_str(r#"base_url = "/api/""#).unwrap();
        assert_eq!(config.base_url, "/api/");
        assert_eq!(config.signature_language, "typescript");
    }

    #[test]
    fn parse_newline_values() {
        let config: DocumenterConfig = toml::from_str(r#"newline = "crlf""#).unwrap();
        assert_eq!(config.newline, Newline::Crlf);
        assert_eq!(config.newline.as_str(), "\r\n");
        assert_eq!(Newline::Lf.as_str(), "\n");
    }

    #[test]
    fn parse_front_matter_table() {
        let toml = r#"
[front_matter]
type = "docs"
weight = "10"
"#;
        let config: DocumenterConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.front_matter.get("type").map(String::as_str), Some("docs"));
        assert_eq!(config.front_matter.len(), 2);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<DocumenterConfig, _> = toml::from_str("base_uri = \"/\"");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(DocumenterConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_base_url_needs_trailing_slash() {
        let config = DocumenterConfig {
            base_url: "/docs".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_base_url_rejects_whitespace_and_empty() {
        for base_url in ["", "/my docs/"] {
            let config = DocumenterConfig {
                base_url: base_url.into(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{base_url:?} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_reserved_front_matter() {
        let mut config = DocumenterConfig::default();
        config
            .front_matter
            .insert("linkTitle".into(), "x".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("linkTitle"));
    }

    #[test]
    fn validate_rejects_blank_signature_language() {
        let config = DocumenterConfig {
            signature_language: " ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Loading and overrides
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE), &ConfigOverrides::default())
            .unwrap();
        assert_eq!(config, DocumenterConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "base_url = \"/api/\"\nshow_inherited_members = true\n").unwrap();

        let config = load_config(&path, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.base_url, "/api/");
        assert!(config.show_inherited_members);
        assert_eq!(config.newline, Newline::Os);
    }

    #[test]
    fn overrides_win_over_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "base_url = \"/api/\"\nnewline = \"crlf\"\n").unwrap();

        let overrides = ConfigOverrides {
            base_url: Some("/v2/".into()),
            newline: Some(Newline::Lf),
            show_inherited_members: None,
        };
        let config = load_config(&path, &overrides).unwrap();
        assert_eq!(config.base_url, "/v2/");
        assert_eq!(config.newline, Newline::Lf);
    }

    #[test]
    fn overrides_are_validated() {
        let tmp = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            base_url: Some("/no-slash".into()),
            ..Default::default()
        };
        let result = load_config(&tmp.path().join(CONFIG_FILE), &overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path, &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_unknown_key_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "[front_matter]\ntype = \"docs\"\n\n[theme]\nx = 1\n").unwrap();

        assert!(load_config(&path, &ConfigOverrides::default()).is_err());
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(3));
    }

    // =========================================================================
    // stock_config_toml
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: DocumenterConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, DocumenterConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_keys() {
        let value = stock_defaults_value().unwrap();
        for key in ["base_url", "newline", "show_inherited_members", "signature_language"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
