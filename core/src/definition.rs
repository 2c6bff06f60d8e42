//! Declarative parser definitions.
//!
//! A [`ParserDefinition`] describes a command's options, parser
//! configuration and usage text in one YAML or JSON document, so a parser
//! can be set up without code.
//!
//! # Example YAML
//!
//! ```yaml
//! command: fetch
//! summary: Download a resource
//! config:
//!   tolerate_unknown_options: true
//! options:
//!   - short: o
//!     long: output
//!     value: required
//!     value_name: FILE
//!     description: Write to FILE
//!   - short: v
//!     long: verbose
//!     description: Print progress
//! use_cases:
//!   - args:
//!       - { name: OPTIONS, optional: true, multiple: true }
//!       - { name: URL }
//!     summary: Fetch URL
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, Result};
use crate::usage::{UsageBuilder, UseCase};
use crate::{OptionSpec, Parser, ParserBuilder, ParserConfig};

/// A command's parser setup and usage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserDefinition {
    /// Command name shown in usage text.
    pub command: String,
    /// One-line command summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Tokenizing rules.
    #[serde(default)]
    pub config: ParserConfig,
    /// Options in registration order.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    /// Use-case lines for usage text. An empty `command` is filled in from
    /// the definition.
    #[serde(default)]
    pub use_cases: Vec<UseCase>,
    /// Separator shown between option keys and values in usage text.
    #[serde(default = "default_usage_separator")]
    pub usage_separator: char,
}

fn default_usage_separator() -> char {
    ' '
}

impl ParserDefinition {
    /// Loads a definition, choosing the format from the file extension
    /// (`.json`, `.yaml` or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DefinitionError::IoError) if the file cannot be
    /// read, [`UnsupportedFormat`](DefinitionError::UnsupportedFormat) for
    /// other extensions, and the matching deserialization error otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let raw = fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json_str(&raw),
            "yaml" | "yml" => Self::from_yaml_str(&raw),
            _ => Err(DefinitionError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](DefinitionError::YamlError) on invalid input.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](DefinitionError::JsonError) on invalid input.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validates the configuration and registers every option.
    ///
    /// # Errors
    ///
    /// Returns [`Config`](DefinitionError::Config) or
    /// [`Registration`](DefinitionError::Registration) for the first
    /// problem found.
    pub fn build_parser(&self) -> Result<Parser> {
        let mut builder = ParserBuilder::new(self.config.clone())?;
        builder.register_all(self.options.iter().cloned())?;
        Ok(builder.build())
    }

    /// Builds the usage text for this definition using `parser`'s options
    /// and prefixes.
    pub fn usage(&self, parser: &Parser) -> UsageBuilder {
        let mut usage = parser
            .usage_builder(&self.command)
            .with_separator(self.usage_separator);
        if let Some(summary) = &self.summary {
            usage = usage.with_summary(summary);
        }
        for use_case in &self.use_cases {
            let mut use_case = use_case.clone();
            if use_case.command.is_empty() {
                use_case.command = self.command.clone();
            }
            usage.add_use_case(use_case);
        }
        usage
    }
}
