//! Translator configuration.
//!
//! Settings live under the `[translator]` section of a TOML file. Every
//! field is optional; absent fields keep their defaults, and callers apply
//! command-line overrides on top.
//!
//! ```toml
//! [translator]
//! dialect = "mysql"
//! expected_type = "string"
//! ```

use crate::dialect::DialectKind;
use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved translator settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// SQL dialect to render for
    pub dialect: DialectKind,
    /// Expected type of the top-level expression
    pub expected_type: ValueType,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::PostgreSql,
            expected_type: ValueType::Node,
        }
    }
}

/// Top-level file structure; unknown sections are ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub translator: Option<TranslatorFileConfig>,
}

/// The `[translator]` section.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct TranslatorFileConfig {
    pub dialect: Option<DialectKind>,
    pub expected_type: Option<ValueType>,
}

/// Errors from config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl TranslatorConfig {
    /// Parse a TOML document, starting from the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if content.trim().is_empty() {
            return Ok(config);
        }
        let file: ConfigFile = toml::from_str(content)?;
        if let Some(section) = &file.translator {
            config.apply(section);
        }
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), dialect = %config.dialect, "loaded translator config");
        Ok(config)
    }

    /// Overwrite the fields set in `section`.
    pub fn apply(&mut self, section: &TranslatorFileConfig) {
        if let Some(dialect) = section.dialect {
            self.dialect = dialect;
        }
        if let Some(ty) = section.expected_type {
            self.expected_type = ty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TranslatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, TranslatorConfig::default());
        assert_eq!(config.dialect, DialectKind::PostgreSql);
        assert_eq!(config.expected_type, ValueType::Node);
    }

    #[test]
    fn test_translator_section() {
        let toml = r#"
[other]
key = "ignored"

[translator]
dialect = "mysql"
expected_type = "string"
"#;
        let config = TranslatorConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.dialect, DialectKind::MySql);
        assert_eq!(config.expected_type, ValueType::String);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = TranslatorConfig::from_toml_str("[translator]\ndialect = \"postgres\"\n").unwrap();
        assert_eq!(config.dialect, DialectKind::PostgreSql);
        assert_eq!(config.expected_type, ValueType::Node);
    }

    #[test]
    fn test_invalid_dialect() {
        let err = TranslatorConfig::from_toml_str("[translator]\ndialect = \"oracle\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[translator]\ndialect = \"h2\"").unwrap();
        let config = TranslatorConfig::load(file.path()).unwrap();
        assert_eq!(config.dialect, DialectKind::H2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TranslatorConfig::load(Path::new("/nonexistent/nodesql.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
