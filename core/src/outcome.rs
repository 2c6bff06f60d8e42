//! Parse results.
//!
//! A [`ParseOutcome`] keeps positional parameters in input order and maps
//! each supplied option's [`Identity`] to its value. Three cases are kept
//! apart: option absent, option present without a value, and option present
//! with a (possibly empty) value.
//!
//! # Examples
//!
//! ```
//! use optparse_core::{OptionSpec, ParserBuilder};
//!
//! let mut builder = ParserBuilder::default();
//! builder.register(OptionSpec::flag(Some('o'), None)).unwrap();
//! builder.register(OptionSpec::optional(Some('t'), Some("opt-two"))).unwrap();
//! let parser = builder.build();
//!
//! let outcome = parser.parse(["-ot", "xx", "rest"]).unwrap();
//! assert_eq!(outcome.positionals(), ["rest"]);
//! assert_eq!(outcome.get('o').unwrap(), Some(None));
//! assert_eq!(outcome.value_of("opt-two").unwrap(), Some("xx"));
//! assert!(!outcome.has_option('x').unwrap());
//! ```

use std::collections::HashMap;

use crate::error::ArgumentError;
use crate::{Identity, OptionSpec};

/// Something an option can be looked up by.
///
/// Implemented for a short name (`char`), a long name (`&str`, `String`),
/// a spec (matches if it shares a short or long name) and an exact
/// [`Identity`].
pub trait OptionKey {
    /// Rejects keys that cannot name any option.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyLongName`] for an empty long name.
    fn check(&self) -> Result<(), ArgumentError> {
        Ok(())
    }

    /// Returns `true` if this key names the option stored under `identity`.
    fn matches(&self, identity: &Identity) -> bool;
}

impl OptionKey for char {
    fn matches(&self, identity: &Identity) -> bool {
        identity.matches_short(*self)
    }
}

impl OptionKey for &str {
    fn check(&self) -> Result<(), ArgumentError> {
        if self.is_empty() {
            return Err(ArgumentError::EmptyLongName);
        }
        Ok(())
    }

    fn matches(&self, identity: &Identity) -> bool {
        identity.matches_long(self)
    }
}

impl OptionKey for String {
    fn check(&self) -> Result<(), ArgumentError> {
        self.as_str().check()
    }

    fn matches(&self, identity: &Identity) -> bool {
        identity.matches_long(self)
    }
}

impl OptionKey for &OptionSpec {
    fn matches(&self, identity: &Identity) -> bool {
        identity.matches_spec(self)
    }
}

impl OptionKey for &Identity {
    fn matches(&self, identity: &Identity) -> bool {
        *self == identity
    }
}

/// Immutable result of one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    case_sensitive: bool,
    positionals: Vec<String>,
    resolved: HashMap<Identity, Option<String>>,
}

impl ParseOutcome {
    pub(crate) fn new(
        case_sensitive: bool,
        positionals: Vec<String>,
        resolved: HashMap<Identity, Option<String>>,
    ) -> Self {
        Self {
            case_sensitive,
            positionals,
            resolved,
        }
    }

    /// Whether the parser that produced this outcome compared names
    /// case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Tokens that were neither option keys nor option values, in input
    /// order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Consumes the outcome, returning the positional parameters.
    pub fn into_positionals(self) -> Vec<String> {
        self.positionals
    }

    /// Looks an option up.
    ///
    /// Returns `None` if it was not supplied, `Some(None)` if it was
    /// supplied without a value, and `Some(Some(value))` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyLongName`] for an empty long name.
    pub fn get<K: OptionKey>(&self, key: K) -> Result<Option<Option<&str>>, ArgumentError> {
        key.check()?;
        Ok(self
            .resolved
            .iter()
            .find(|(identity, _)| key.matches(identity))
            .map(|(_, value)| value.as_deref()))
    }

    /// Returns `true` if the option was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyLongName`] for an empty long name.
    pub fn has_option<K: OptionKey>(&self, key: K) -> Result<bool, ArgumentError> {
        Ok(self.get(key)?.is_some())
    }

    /// Returns the option's value if it was supplied with one.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyLongName`] for an empty long name.
    pub fn value_of<K: OptionKey>(&self, key: K) -> Result<Option<&str>, ArgumentError> {
        Ok(self.get(key)?.flatten())
    }

    /// All supplied options and their values, in no particular order.
    pub fn options(&self) -> impl Iterator<Item = (&Identity, Option<&str>)> {
        self.resolved
            .iter()
            .map(|(identity, value)| (identity, value.as_deref()))
    }

    /// Number of supplied options.
    pub fn option_count(&self) -> usize {
        self.resolved.len()
    }
}
