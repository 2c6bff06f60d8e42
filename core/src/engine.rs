//! Parse state machine.
//!
//! The engine folds token classifications into a [`ParseOutcome`]. Its only
//! cross-token state is a key whose value may still arrive as the next
//! token ([`ParseState::AwaitingValue`]). Each step is a pure
//! [`transition`] from `(state, classification)` to a new state plus the
//! contributions the token makes; [`ParseRun`] applies those contributions
//! and rejects options supplied twice.

use std::collections::HashMap;

use tracing::trace;

use crate::classify::{Classification, ClusterValue};
use crate::error::{FailureReason, ParseFailure};
use crate::registry::RegisteredOption;
use crate::{Identity, ParseOutcome, ValueKind};

/// Cross-token parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState<'r> {
    /// No value pending.
    #[default]
    Idle,
    /// The option's value may be the next token.
    AwaitingValue(&'r RegisteredOption),
}

/// What a token adds to the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contribution<'r> {
    /// Append to the positional parameters.
    Positional(String),
    /// Record an option as supplied, with or without a value.
    Resolve(&'r RegisteredOption, Option<String>),
}

/// Result of one [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<'r> {
    /// State after the token.
    pub state: ParseState<'r>,
    /// Contributions in the order they apply.
    pub contributions: Vec<Contribution<'r>>,
}

/// Computes the effect of one token.
///
/// `token` is the raw token the classification was made from; it becomes a
/// pending option's value verbatim. `accepts_space` tells whether a value
/// may be deferred to the next token.
pub fn transition<'r>(
    state: ParseState<'r>,
    token: &str,
    class: Classification<'r, '_>,
    accepts_space: bool,
) -> Result<Transition<'r>, FailureReason> {
    let mut contributions = Vec::new();

    if let ParseState::AwaitingValue(pending) = state {
        match class {
            Classification::Empty => {
                return Ok(Transition {
                    state,
                    contributions,
                });
            }
            Classification::Positional | Classification::ConsumedUnknown => {
                contributions.push(Contribution::Resolve(pending, Some(token.to_string())));
                return Ok(Transition {
                    state: ParseState::Idle,
                    contributions,
                });
            }
            Classification::LongKey { .. } | Classification::ShortCluster { .. } => {
                contributions.push(resolve_without_value(pending)?);
            }
        }
    }

    let state = match class {
        Classification::Empty | Classification::ConsumedUnknown => ParseState::Idle,
        Classification::Positional => {
            contributions.push(Contribution::Positional(token.to_string()));
            ParseState::Idle
        }
        Classification::LongKey { option, value } => {
            resolve_tail(option, value, accepts_space, &mut contributions)?
        }
        Classification::ShortCluster { options, value } => {
            let Some((&last, init)) = options.split_last() else {
                return Ok(Transition {
                    state: ParseState::Idle,
                    contributions,
                });
            };
            for &option in init {
                contributions.push(resolve_without_value(option)?);
            }
            match value {
                ClusterValue::Absent => {
                    resolve_tail(last, None, accepts_space, &mut contributions)?
                }
                ClusterValue::Inline(v) => {
                    resolve_tail(last, Some(v), accepts_space, &mut contributions)?
                }
                ClusterValue::Discarded => {
                    contributions.push(resolve_without_value(last)?);
                    ParseState::Idle
                }
            }
        }
    };

    Ok(Transition {
        state,
        contributions,
    })
}

/// Resolves an option that has no value source. Only legal when the value
/// is not required.
fn resolve_without_value(option: &RegisteredOption) -> Result<Contribution<'_>, FailureReason> {
    if option.spec.value_kind == ValueKind::Required {
        return Err(FailureReason::MissingRequiredValue(
            option.identity.to_string(),
        ));
    }
    Ok(Contribution::Resolve(option, None))
}

/// Resolves the final key of a token. Returns `AwaitingValue` when the
/// value is deferred to the next token.
fn resolve_tail<'r>(
    option: &'r RegisteredOption,
    value: Option<&str>,
    accepts_space: bool,
    contributions: &mut Vec<Contribution<'r>>,
) -> Result<ParseState<'r>, FailureReason> {
    match value {
        Some(v) => contributions.push(Contribution::Resolve(option, Some(v.to_string()))),
        None if option.spec.value_kind == ValueKind::None => {
            contributions.push(Contribution::Resolve(option, None))
        }
        None if accepts_space => return Ok(ParseState::AwaitingValue(option)),
        None => contributions.push(resolve_without_value(option)?),
    }
    Ok(ParseState::Idle)
}

/// One in-progress parse. Owns all mutable state, so concurrent runs over
/// the same registry never interfere.
#[derive(Debug, Default)]
pub struct ParseRun<'r> {
    state: ParseState<'r>,
    positionals: Vec<String>,
    resolved: HashMap<Identity, Option<String>>,
}

impl<'r> ParseRun<'r> {
    /// Starts an idle run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one classified token.
    ///
    /// # Errors
    ///
    /// Fails on a missing required value or an option supplied twice.
    pub fn step(
        &mut self,
        token: &str,
        class: Classification<'r, '_>,
        accepts_space: bool,
    ) -> Result<(), ParseFailure> {
        let next = transition(self.state, token, class, accepts_space).map_err(ParseFailure::new)?;
        for contribution in next.contributions {
            self.apply(contribution)?;
        }
        if let ParseState::AwaitingValue(pending) = next.state {
            self.ensure_unresolved(pending)?;
        }
        trace!(token, state = ?next.state.pending_name(), "Applied token");
        self.state = next.state;
        Ok(())
    }

    /// Ends the stream, resolving a still-pending option without a value.
    ///
    /// # Errors
    ///
    /// Fails if the pending option requires a value.
    pub fn finish(mut self, case_sensitive: bool) -> Result<ParseOutcome, ParseFailure> {
        if let ParseState::AwaitingValue(pending) = self.state {
            let contribution = resolve_without_value(pending).map_err(ParseFailure::new)?;
            self.apply(contribution)?;
        }
        Ok(ParseOutcome::new(
            case_sensitive,
            self.positionals,
            self.resolved,
        ))
    }

    fn apply(&mut self, contribution: Contribution<'r>) -> Result<(), ParseFailure> {
        match contribution {
            Contribution::Positional(token) => self.positionals.push(token),
            Contribution::Resolve(option, value) => {
                self.ensure_unresolved(option)?;
                self.resolved.insert(option.identity.clone(), value);
            }
        }
        Ok(())
    }

    fn ensure_unresolved(&self, option: &RegisteredOption) -> Result<(), ParseFailure> {
        if self.resolved.contains_key(&option.identity) {
            return Err(ParseFailure::new(FailureReason::DuplicateOption(
                option.identity.to_string(),
            )));
        }
        Ok(())
    }
}

impl ParseState<'_> {
    fn pending_name(&self) -> Option<String> {
        match self {
            ParseState::Idle => None,
            ParseState::AwaitingValue(option) => Some(option.identity.to_string()),
        }
    }
}
