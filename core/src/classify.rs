//! Token classification.
//!
//! Decides, for a single raw token, whether it is a positional parameter, a
//! long option key, or a cluster of short option keys, and extracts the
//! inline value if one is attached. Classification is a pure function of
//! the token, the frozen registry and the configuration; cross-token state
//! lives in the [`engine`](crate::engine).
//!
//! Prefix overlap is resolved by testing the longer prefix first. When both
//! prefixes are identical, a token is matched as a long name first and
//! reinterpreted as a short cluster if no long option has that name.

use tracing::trace;

use crate::error::{FailureReason, ParseFailure};
use crate::registry::{RegisteredOption, Registry};
use crate::{ParserConfig, ValueKind};

/// What the value part of a short cluster applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterValue<'t> {
    /// No separator in the token.
    Absent,
    /// Value bound to the last key of the cluster.
    Inline(&'t str),
    /// A value was given but the character it followed was dropped as
    /// unknown, so it belongs to no key.
    Discarded,
}

/// Shape of one raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'r, 't> {
    /// The empty string. Contributes nothing.
    Empty,
    /// Not option-shaped.
    Positional,
    /// A registered long option, with its inline value if any.
    LongKey {
        option: &'r RegisteredOption,
        value: Option<&'t str>,
    },
    /// One or more registered short options in token order.
    ShortCluster {
        options: Vec<&'r RegisteredOption>,
        value: ClusterValue<'t>,
    },
    /// An option-shaped token in which nothing matched; dropped under
    /// tolerance.
    ConsumedUnknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefixKind {
    Long,
    Short,
}

/// Classifies tokens against a frozen registry.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    registry: &'r Registry,
    config: &'r ParserConfig,
}

impl<'r> Classifier<'r> {
    /// Creates a classifier over `registry` using the tokenizing rules in
    /// `config`.
    pub fn new(registry: &'r Registry, config: &'r ParserConfig) -> Self {
        Self { registry, config }
    }

    /// Classifies one token.
    ///
    /// # Errors
    ///
    /// Fails for ambiguous separators (`--a=b=c`), an inline value on an
    /// option that takes none, and unknown options when tolerance is off.
    pub fn classify<'t>(&self, token: &'t str) -> Result<Classification<'r, 't>, ParseFailure> {
        if token.is_empty() {
            return Ok(Classification::Empty);
        }

        let long = self.config.long_prefix.as_str();
        let short = self.config.short_prefix.as_str();

        if long == short {
            let Some(body) = token.strip_prefix(long) else {
                return Ok(Classification::Positional);
            };
            return match self.long_key(body)? {
                Some(class) => Ok(class),
                None => self.short_cluster(body),
            };
        }

        let order = if short.len() > long.len() {
            [PrefixKind::Short, PrefixKind::Long]
        } else {
            [PrefixKind::Long, PrefixKind::Short]
        };
        for kind in order {
            match kind {
                PrefixKind::Long => {
                    if let Some(body) = token.strip_prefix(long) {
                        return match self.long_key(body)? {
                            Some(class) => Ok(class),
                            None => self.unknown(format!("{long}{body}")),
                        };
                    }
                }
                PrefixKind::Short => {
                    if let Some(body) = token.strip_prefix(short) {
                        return self.short_cluster(body);
                    }
                }
            }
        }

        Ok(Classification::Positional)
    }

    /// Matches `body` as a long name. `Ok(None)` means no option has that
    /// name.
    fn long_key<'t>(
        &self,
        body: &'t str,
    ) -> Result<Option<Classification<'r, 't>>, ParseFailure> {
        let (name, value) = self.split(body)?;

        // An empty name addresses nothing; lookup_long would reject it.
        if name.is_empty() {
            return Ok(None);
        }
        let Ok(Some(option)) = self.registry.lookup_long(name) else {
            return Ok(None);
        };

        if option.spec.value_kind == ValueKind::None && value.is_some() {
            return Err(ParseFailure::new(FailureReason::ValueNotAllowed(
                option.identity.to_string(),
            )));
        }

        trace!(option = %option.identity, ?value, "Classified long key");
        Ok(Some(Classification::LongKey { option, value }))
    }

    fn short_cluster<'t>(&self, body: &'t str) -> Result<Classification<'r, 't>, ParseFailure> {
        let (names, value) = self.split(body)?;

        let mut options = Vec::with_capacity(names.len());
        let mut last_dropped = false;
        for c in names.chars() {
            match self.registry.lookup_short(c) {
                Some(option) => {
                    options.push(option);
                    last_dropped = false;
                }
                None if self.config.tolerate_unknown_options => {
                    trace!(short = %c, "Dropped unknown short option");
                    last_dropped = true;
                }
                None => {
                    return Err(ParseFailure::new(FailureReason::UnknownOption(format!(
                        "{}{c}",
                        self.config.short_prefix
                    ))));
                }
            }
        }

        let Some(last) = options.last() else {
            return Ok(Classification::ConsumedUnknown);
        };

        let value = match value {
            None => ClusterValue::Absent,
            Some(_) if last_dropped => ClusterValue::Discarded,
            Some(_) if last.spec.value_kind == ValueKind::None => {
                return Err(ParseFailure::new(FailureReason::ValueNotAllowed(
                    last.identity.to_string(),
                )));
            }
            Some(v) => ClusterValue::Inline(v),
        };

        trace!(count = options.len(), ?value, "Classified short cluster");
        Ok(Classification::ShortCluster { options, value })
    }

    fn unknown<'t>(&self, name: String) -> Result<Classification<'r, 't>, ParseFailure> {
        if self.config.tolerate_unknown_options {
            trace!(%name, "Dropped unknown long option");
            Ok(Classification::ConsumedUnknown)
        } else {
            Err(ParseFailure::new(FailureReason::UnknownOption(name)))
        }
    }

    /// Splits a prefix-stripped token into key part and inline value. More
    /// than one separator is ambiguous.
    fn split<'t>(&self, body: &'t str) -> Result<(&'t str, Option<&'t str>), ParseFailure> {
        let mut parts = body.split(|c| self.config.is_separator(c));
        let key = parts.next().unwrap_or_default();
        let value = parts.next();
        if parts.next().is_some() {
            return Err(ParseFailure::new(FailureReason::MalformedToken(
                body.to_string(),
            )));
        }
        Ok((key, value))
    }
}
