//! Parser configuration.
//!
//! Set once when a parser is built and read-only afterwards. Every field
//! has a default, so a partial YAML/JSON document is enough.
//!
//! # Example YAML
//!
//! ```yaml
//! case_sensitive: false
//! long_prefix: "--"
//! short_prefix: "-"
//! separators: [" ", "=", ":"]
//! tolerate_unknown_options: true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default prefix for long option names.
pub const DEFAULT_LONG_PREFIX: &str = "--";
/// Default prefix for short option names.
pub const DEFAULT_SHORT_PREFIX: &str = "-";
/// Default key/value separators.
pub const DEFAULT_SEPARATORS: [char; 2] = [' ', '='];

/// Tokenizing and matching rules for a parser.
///
/// # Examples
///
/// ```
/// use optparse_core::ParserConfig;
///
/// let config = ParserConfig::default()
///     .with_case_sensitive(false)
///     .with_separators([':', ' ']);
/// assert!(config.accepts_space());
/// assert!(config.is_separator(':'));
/// assert!(!config.is_separator('='));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Compare option names case-sensitively.
    pub case_sensitive: bool,
    /// Prefix introducing a long option name.
    pub long_prefix: String,
    /// Prefix introducing one or more clustered short option names.
    pub short_prefix: String,
    /// Characters that separate an option key from its value. A space
    /// allows the value to be given as the next token.
    pub separators: Vec<char>,
    /// Drop unregistered options instead of failing the parse.
    pub tolerate_unknown_options: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            long_prefix: DEFAULT_LONG_PREFIX.to_string(),
            short_prefix: DEFAULT_SHORT_PREFIX.to_string(),
            separators: DEFAULT_SEPARATORS.to_vec(),
            tolerate_unknown_options: false,
        }
    }
}

impl ParserConfig {
    /// Sets case sensitivity.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets the long-name prefix.
    pub fn with_long_prefix(mut self, prefix: &str) -> Self {
        self.long_prefix = prefix.to_string();
        self
    }

    /// Sets the short-name prefix.
    pub fn with_short_prefix(mut self, prefix: &str) -> Self {
        self.short_prefix = prefix.to_string();
        self
    }

    /// Replaces the separator set.
    pub fn with_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.separators = separators.into_iter().collect();
        self
    }

    /// Sets unknown-option tolerance.
    pub fn with_tolerate_unknown_options(mut self, tolerate: bool) -> Self {
        self.tolerate_unknown_options = tolerate;
        self
    }

    /// Returns `true` if `c` separates a key from its value.
    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }

    /// Returns `true` if a value may follow as the next token.
    pub fn accepts_space(&self) -> bool {
        self.is_separator(' ')
    }

    /// Checks that the configuration can classify tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPrefix`] if either prefix is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.long_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("long"));
        }
        if self.short_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("short"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert!(config.case_sensitive);
        assert_eq!(config.long_prefix, "--");
        assert_eq!(config.short_prefix, "-");
        assert_eq!(config.separators, vec![' ', '=']);
        assert!(!config.tolerate_unknown_options);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let config = ParserConfig::default().with_short_prefix("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyPrefix("short")));
        let config = ParserConfig::default().with_long_prefix("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyPrefix("long")));
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "case_sensitive: false\nseparators: ['=']\n";
        let config: ParserConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.case_sensitive);
        assert!(!config.accepts_space());
        assert_eq!(config.long_prefix, "--");
    }
}
