//! Option definitions.
//!
//! An [`OptionSpec`] describes one option the parser understands: its short
//! and/or long name, whether it takes a value, and the metadata the usage
//! formatter prints. Specs are plain data; they are checked when handed to
//! [`RegistryBuilder::register`](crate::RegistryBuilder::register).

use serde::{Deserialize, Serialize};

/// Whether an option takes a value.
///
/// # Examples
///
/// ```
/// use optparse_core::ValueKind;
///
/// assert_eq!(ValueKind::default(), ValueKind::None);
/// assert!(ValueKind::Required.takes_value());
/// assert!(!ValueKind::None.takes_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A switch: never takes a value (the default).
    #[default]
    None,
    /// Must be followed by a value, inline or as the next token.
    Required,
    /// May take a value; supplying none is fine.
    Optional,
}

impl ValueKind {
    /// Returns `true` for [`Required`](ValueKind::Required) and
    /// [`Optional`](ValueKind::Optional).
    pub fn takes_value(self) -> bool {
        !matches!(self, ValueKind::None)
    }
}

/// A registered option definition.
///
/// At least one of `short_name` / `long_name` must be present for the spec
/// to be accepted by a registry. The display fields are only read by the
/// usage formatter.
///
/// Use the constructors [`flag`](OptionSpec::flag),
/// [`required`](OptionSpec::required) and [`optional`](OptionSpec::optional),
/// then chain builder methods like
/// [`with_description`](OptionSpec::with_description).
///
/// # Examples
///
/// ```
/// use optparse_core::{OptionSpec, ValueKind};
///
/// let verbose = OptionSpec::flag(Some('v'), Some("verbose"))
///     .with_description("Print more output");
/// assert_eq!(verbose.value_kind, ValueKind::None);
/// assert_eq!(verbose.display_name(), "verbose");
///
/// let output = OptionSpec::required(Some('o'), Some("output")).with_value_name("FILE");
/// assert_eq!(output.value_name.as_deref(), Some("FILE"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Single-character name used after the short prefix (e.g. `o` in `-o`).
    #[serde(default, rename = "short")]
    pub short_name: Option<char>,
    /// Name used after the long prefix (e.g. `output` in `--output`).
    #[serde(default, rename = "long")]
    pub long_name: Option<String>,
    /// Whether the option takes a value.
    #[serde(default, rename = "value")]
    pub value_kind: ValueKind,
    /// Placeholder shown in usage text (e.g. `FILE`).
    #[serde(default)]
    pub value_name: Option<String>,
    /// One-line description shown in usage text.
    #[serde(default)]
    pub description: String,
    /// Whether the option is listed in usage text.
    #[serde(default = "default_visible")]
    pub visible_in_usage: bool,
}

fn default_visible() -> bool {
    true
}

impl OptionSpec {
    /// Creates a spec with the given names and value kind.
    pub fn new(short_name: Option<char>, long_name: Option<&str>, value_kind: ValueKind) -> Self {
        Self {
            short_name,
            long_name: long_name.map(String::from),
            value_kind,
            value_name: None,
            description: String::new(),
            visible_in_usage: true,
        }
    }

    /// Creates an option that never takes a value.
    pub fn flag(short_name: Option<char>, long_name: Option<&str>) -> Self {
        Self::new(short_name, long_name, ValueKind::None)
    }

    /// Creates an option that requires a value.
    pub fn required(short_name: Option<char>, long_name: Option<&str>) -> Self {
        Self::new(short_name, long_name, ValueKind::Required)
    }

    /// Creates an option whose value may be omitted.
    pub fn optional(short_name: Option<char>, long_name: Option<&str>) -> Self {
        Self::new(short_name, long_name, ValueKind::Optional)
    }

    /// Sets the value placeholder shown in usage text.
    pub fn with_value_name(mut self, name: &str) -> Self {
        self.value_name = Some(name.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Hides the option from usage text. It is still parsed.
    pub fn hidden(mut self) -> Self {
        self.visible_in_usage = false;
        self
    }

    /// Returns the name used in messages (long name preferred, falls back to
    /// the short name).
    ///
    /// # Examples
    ///
    /// ```
    /// use optparse_core::OptionSpec;
    ///
    /// assert_eq!(OptionSpec::flag(Some('q'), Some("quiet")).display_name(), "quiet");
    /// assert_eq!(OptionSpec::flag(Some('q'), None).display_name(), "q");
    /// ```
    pub fn display_name(&self) -> String {
        match (&self.long_name, self.short_name) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => "<unnamed>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_value_kind() {
        assert_eq!(OptionSpec::flag(Some('a'), None).value_kind, ValueKind::None);
        assert_eq!(
            OptionSpec::required(Some('a'), None).value_kind,
            ValueKind::Required
        );
        assert_eq!(
            OptionSpec::optional(None, Some("all")).value_kind,
            ValueKind::Optional
        );
    }

    #[test]
    fn test_hidden_clears_visibility() {
        let spec = OptionSpec::flag(Some('x'), None);
        assert!(spec.visible_in_usage);
        assert!(!spec.hidden().visible_in_usage);
    }

    #[test]
    fn test_deserialize_defaults() {
        let spec: OptionSpec = serde_json::from_str(r#"{"short": "t", "value": "optional"}"#).unwrap();
        assert_eq!(spec.short_name, Some('t'));
        assert_eq!(spec.long_name, None);
        assert_eq!(spec.value_kind, ValueKind::Optional);
        assert!(spec.visible_in_usage);
        assert!(spec.description.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_unknown_value_kind() {
        let result: Result<OptionSpec, _> = serde_json::from_str(r#"{"short": "t", "value": "maybe"}"#);
        assert!(result.is_err());
    }
}
