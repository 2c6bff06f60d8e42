//! Option registry.
//!
//! Registration happens on a [`RegistryBuilder`]; [`freeze`](RegistryBuilder::freeze)
//! turns it into a read-only [`Registry`] that the classifier and the parse
//! engine share. There is no way to add an option to a frozen registry.
//!
//! # Examples
//!
//! ```
//! use optparse_core::{OptionSpec, RegistrationError, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::new(true);
//! builder.register(OptionSpec::flag(Some('v'), Some("verbose"))).unwrap();
//!
//! // Same short name → rejected
//! let err = builder.register(OptionSpec::flag(Some('v'), None)).unwrap_err();
//! assert!(matches!(err, RegistrationError::DuplicateOption(_)));
//!
//! let registry = builder.freeze();
//! assert!(registry.lookup_short('v').is_some());
//! assert!(registry.lookup_long("verbose").unwrap().is_some());
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ArgumentError, RegistrationError};
use crate::{Identity, OptionSpec};

/// A spec together with the identity it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredOption {
    /// Normalized key.
    pub identity: Identity,
    /// The definition as registered.
    pub spec: OptionSpec,
}

/// Mutable, pre-freeze registry.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    case_sensitive: bool,
    entries: Vec<RegisteredOption>,
}

impl RegistryBuilder {
    /// Creates an empty builder comparing names under the given case rule.
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            entries: Vec::new(),
        }
    }

    /// Adds an option.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::InvalidSpec`] if the spec has no name, an empty
    ///   long name, or a whitespace short name.
    /// - [`RegistrationError::DuplicateOption`] if an already registered
    ///   option shares the short or the long name (after normalization).
    pub fn register(&mut self, spec: OptionSpec) -> Result<(), RegistrationError> {
        check_names(&spec)?;

        let identity = Identity::of(&spec, self.case_sensitive);
        if let Some(existing) = self.entries.iter().find(|e| e.identity.overlaps(&identity)) {
            debug!(option = %identity, existing = %existing.identity, "Rejected duplicate option");
            return Err(RegistrationError::DuplicateOption(existing.identity.to_string()));
        }

        self.entries.push(RegisteredOption { identity, spec });
        Ok(())
    }

    /// Number of options registered so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the registry, building the lookup indexes.
    pub fn freeze(self) -> Registry {
        let mut by_short = HashMap::new();
        let mut by_long = HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(short) = entry.identity.short() {
                by_short.insert(short, index);
            }
            if let Some(long) = entry.identity.long() {
                by_long.insert(long.to_string(), index);
            }
        }
        Registry {
            case_sensitive: self.case_sensitive,
            entries: self.entries,
            by_short,
            by_long,
        }
    }
}

fn check_names(spec: &OptionSpec) -> Result<(), RegistrationError> {
    if spec.long_name.as_deref() == Some("") {
        return Err(RegistrationError::InvalidSpec(
            "long name cannot be empty".to_string(),
        ));
    }
    if spec.short_name.is_none() && spec.long_name.is_none() {
        return Err(RegistrationError::InvalidSpec(
            "option must define a short or long name".to_string(),
        ));
    }
    if let Some(short) = spec.short_name.filter(|c| c.is_whitespace()) {
        return Err(RegistrationError::InvalidSpec(format!(
            "short name cannot be whitespace: {short:?}"
        )));
    }
    Ok(())
}

/// Frozen, read-only registry.
///
/// Safe to share between threads; parsing never mutates it.
#[derive(Debug, Clone)]
pub struct Registry {
    case_sensitive: bool,
    entries: Vec<RegisteredOption>,
    by_short: HashMap<char, usize>,
    by_long: HashMap<String, usize>,
}

impl Registry {
    /// Whether names are compared case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Finds the option with the given short name.
    pub fn lookup_short(&self, short: char) -> Option<&RegisteredOption> {
        let key = Identity::new(Some(short), None, self.case_sensitive).short()?;
        self.by_short.get(&key).map(|&i| &self.entries[i])
    }

    /// Finds the option with the given long name.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyLongName`] for the empty string.
    pub fn lookup_long(&self, long: &str) -> Result<Option<&RegisteredOption>, ArgumentError> {
        if long.is_empty() {
            return Err(ArgumentError::EmptyLongName);
        }
        let Some(key) = Identity::new(None, Some(long), self.case_sensitive)
            .long()
            .map(str::to_string)
        else {
            return Ok(None);
        };
        Ok(self.by_long.get(&key).map(|&i| &self.entries[i]))
    }

    /// Finds the option stored under exactly this identity.
    pub fn get(&self, identity: &Identity) -> Option<&RegisteredOption> {
        self.entries.iter().find(|e| e.identity == *identity)
    }

    /// All options in registration order.
    pub fn options(&self) -> impl Iterator<Item = &RegisteredOption> {
        self.entries.iter()
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no option is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueKind;

    #[test]
    fn test_register_rejects_nameless_spec() {
        let mut builder = RegistryBuilder::new(true);
        let err = builder
            .register(OptionSpec::flag(None, None))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidSpec(_)));

        let err = builder
            .register(OptionSpec::flag(None, Some("")))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidSpec(_)));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_register_rejects_whitespace_short_name() {
        let mut builder = RegistryBuilder::new(true);
        let err = builder.register(OptionSpec::flag(Some(' '), None)).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidSpec(_)));
    }

    #[test]
    fn test_register_rejects_shared_long_name() {
        let mut builder = RegistryBuilder::new(true);
        builder
            .register(OptionSpec::flag(Some('s'), Some("saas")))
            .unwrap();
        let err = builder
            .register(OptionSpec::flag(Some('x'), Some("saas")))
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateOption("-s,--saas".to_string()));
    }

    #[test]
    fn test_register_duplicate_check_uses_case_rule() {
        let mut sensitive = RegistryBuilder::new(true);
        sensitive.register(OptionSpec::flag(Some('i'), None)).unwrap();
        assert!(sensitive.register(OptionSpec::flag(Some('I'), None)).is_ok());

        let mut insensitive = RegistryBuilder::new(false);
        insensitive
            .register(OptionSpec::flag(None, Some("iaas")))
            .unwrap();
        assert!(matches!(
            insensitive.register(OptionSpec::flag(None, Some("IAAS"))),
            Err(RegistrationError::DuplicateOption(_))
        ));
    }

    #[test]
    fn test_short_only_and_long_only_coexist() {
        let mut builder = RegistryBuilder::new(true);
        builder.register(OptionSpec::flag(Some('t'), None)).unwrap();
        builder
            .register(OptionSpec::required(None, Some("opt-three")))
            .unwrap();
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_lookup_normalizes_input() {
        let mut builder = RegistryBuilder::new(false);
        builder
            .register(OptionSpec::optional(Some('t'), Some("opt-two")))
            .unwrap();
        let registry = builder.freeze();

        let by_short = registry.lookup_short('T').unwrap();
        let by_long = registry.lookup_long("Opt-Two").unwrap().unwrap();
        assert_eq!(by_short.identity, by_long.identity);
        assert_eq!(by_short.spec.value_kind, ValueKind::Optional);
        assert!(registry.lookup_short('x').is_none());
    }

    #[test]
    fn test_lookup_long_rejects_empty_name() {
        let registry = RegistryBuilder::new(true).freeze();
        assert_eq!(registry.lookup_long(""), Err(ArgumentError::EmptyLongName));
        assert_eq!(registry.lookup_long("missing"), Ok(None));
    }

    #[test]
    fn test_options_keep_registration_order() {
        let mut builder = RegistryBuilder::new(true);
        builder.register(OptionSpec::flag(Some('b'), None)).unwrap();
        builder.register(OptionSpec::flag(Some('a'), None)).unwrap();
        let registry = builder.freeze();
        let shorts: Vec<_> = registry
            .options()
            .map(|o| o.spec.short_name.unwrap())
            .collect();
        assert_eq!(shorts, vec!['b', 'a']);
    }
}
