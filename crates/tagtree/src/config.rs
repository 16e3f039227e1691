// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializer configuration.
//!
//! Defaults reproduce the plain format exactly: LF line endings, text written
//! as-is, no nesting limit. A limit can be opted into with `max_depth`.
//!
//! With the `config-loaders` feature the configuration can be read from YAML:
//!
//! ```yaml
//! line_ending: crlf
//! text_escape: markup
//! max_depth: 16
//! ```

#[cfg(feature = "config-loaders")]
use crate::error::{Error, Result};
#[cfg(feature = "config-loaders")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "config-loaders")]
use std::path::Path;

/// Default nesting limit (`0` = unlimited).
pub const DEFAULT_MAX_DEPTH: usize = 0;

/// Line terminator written after every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-loaders", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(rename_all = "lowercase"))]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Terminator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Treatment of text primitives that collide with tag syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-loaders", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(rename_all = "lowercase"))]
pub enum TextEscape {
    /// Written verbatim, `<` and `&` included.
    #[default]
    Raw,
    /// `&`, `<` and `>` replaced by entity references.
    Markup,
}

/// Serializer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default, deny_unknown_fields))]
pub struct SerializerConfig {
    /// Line terminator.
    pub line_ending: LineEnding,
    /// Text primitive escaping.
    pub text_escape: TextEscape,
    /// Maximum element nesting (root is depth 1). `0` disables the check.
    pub max_depth: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            text_escape: TextEscape::Raw,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SerializerConfig {
    /// Set line ending.
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set text escaping.
    pub fn text_escape(mut self, text_escape: TextEscape) -> Self {
        self.text_escape = text_escape;
        self
    }

    /// Set nesting limit (`0` = unlimited).
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse from a YAML document.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from a YAML file.
    #[cfg(feature = "config-loaders")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        log::debug!("[config] loading serializer config from {}", path.display());
        Self::from_yaml_str(&yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SerializerConfig::default();
        assert_eq!(config.line_ending.as_str(), "\n");
        assert_eq!(config.text_escape, TextEscape::Raw);
        assert_eq!(config.max_depth, 0);
    }

    #[test]
    fn test_setters() {
        let config = SerializerConfig::default()
            .line_ending(LineEnding::CrLf)
            .text_escape(TextEscape::Markup)
            .max_depth(16);
        assert_eq!(config.line_ending.as_str(), "\r\n");
        assert_eq!(config.text_escape, TextEscape::Markup);
        assert_eq!(config.max_depth, 16);
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_from_yaml_partial() {
        let config = SerializerConfig::from_yaml_str("text_escape: markup\n").expect("yaml");
        assert_eq!(config.text_escape, TextEscape::Markup);
        assert_eq!(config.line_ending, LineEnding::Lf);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_from_yaml_rejects_unknown_keys() {
        let err = SerializerConfig::from_yaml_str("indent: 4\n");
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_load_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "line_ending: crlf").expect("write");
        writeln!(file, "max_depth: 8").expect("write");

        let config = SerializerConfig::load(file.path()).expect("load");
        assert_eq!(config.line_ending, LineEnding::CrLf);
        assert_eq!(config.max_depth, 8);
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_load_missing_file() {
        let err = SerializerConfig::load("/nonexistent/tagtree.yaml");
        assert!(matches!(err, Err(Error::Io(_))));
    }
}
