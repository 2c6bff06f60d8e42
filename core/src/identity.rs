//! Normalized option identities.
//!
//! An [`Identity`] is the key under which an option is stored in the
//! registry and in a [`ParseOutcome`](crate::ParseOutcome). Names are
//! lower-cased when the identity is case-insensitive so that lookups from
//! raw tokens compare equal regardless of input case.

use std::fmt;

use crate::OptionSpec;

/// Normalized `(short, long)` name pair plus the case-sensitivity it was
/// built under.
///
/// Equality is structural: two identities are equal when they were built
/// with the same case flag and their normalized components are equal (an
/// absent component only equals another absent component).
///
/// # Examples
///
/// ```
/// use optparse_core::Identity;
///
/// let a = Identity::new(Some('T'), Some("Opt-Two"), false);
/// let b = Identity::new(Some('t'), Some("opt-two"), false);
/// assert_eq!(a, b);
///
/// let sensitive = Identity::new(Some('t'), Some("opt-two"), true);
/// assert_ne!(b, sensitive);
/// assert!(a.matches_short('t'));
/// assert!(a.matches_long("OPT-TWO"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    short: Option<char>,
    long: Option<String>,
    case_sensitive: bool,
}

impl Identity {
    /// Builds an identity, normalizing both names. An empty long name is
    /// treated as absent.
    pub fn new(short: Option<char>, long: Option<&str>, case_sensitive: bool) -> Self {
        Self {
            short: short.map(|c| normalize_char(c, case_sensitive)),
            long: long
                .filter(|name| !name.is_empty())
                .map(|name| normalize_str(name, case_sensitive)),
            case_sensitive,
        }
    }

    /// Builds the identity of a spec.
    pub fn of(spec: &OptionSpec, case_sensitive: bool) -> Self {
        Self::new(spec.short_name, spec.long_name.as_deref(), case_sensitive)
    }

    /// Normalized short component.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// Normalized long component.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Whether names were compared case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns `true` if `short` names this identity.
    pub fn matches_short(&self, short: char) -> bool {
        self.short == Some(normalize_char(short, self.case_sensitive))
    }

    /// Returns `true` if `long` names this identity.
    ///
    /// Callers reject empty names before getting here; an empty name never
    /// matches.
    pub fn matches_long(&self, long: &str) -> bool {
        match &self.long {
            Some(own) if !long.is_empty() => *own == normalize_str(long, self.case_sensitive),
            _ => false,
        }
    }

    /// Returns `true` if the spec shares at least one populated name with
    /// this identity.
    pub fn matches_spec(&self, spec: &OptionSpec) -> bool {
        spec.short_name.is_some_and(|c| self.matches_short(c))
            || spec
                .long_name
                .as_deref()
                .is_some_and(|name| self.matches_long(name))
    }

    /// Returns `true` if the two identities share a populated component.
    pub fn overlaps(&self, other: &Identity) -> bool {
        self.short.is_some_and(|c| other.matches_short(c))
            || self.long.as_deref().is_some_and(|name| other.matches_long(name))
    }

    /// Renders the identity with the given prefixes, e.g. `-t,--opt-two`.
    pub fn render(&self, short_prefix: &str, long_prefix: &str) -> String {
        match (self.short, &self.long) {
            (Some(short), Some(long)) => format!("{short_prefix}{short},{long_prefix}{long}"),
            (Some(short), None) => format!("{short_prefix}{short}"),
            (None, Some(long)) => format!("{long_prefix}{long}"),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("-", "--"))
    }
}

fn normalize_char(c: char, case_sensitive: bool) -> char {
    if case_sensitive {
        return c;
    }
    // Characters whose lowercase form spans several chars keep their own form.
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn normalize_str(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}
