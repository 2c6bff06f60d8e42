//! Error types.
//!
//! Registration and configuration errors are distinguishable so callers can
//! fix their option table. Parse failures are deliberately uniform: bad user
//! input yields a single [`ParseFailure`] whatever the cause.

use std::fmt;

use thiserror::Error;

/// Rejected [`register`](crate::RegistryBuilder::register) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The spec cannot be addressed from a token (no name, empty long name,
    /// whitespace short name, or a name containing a separator).
    #[error("invalid option spec: {0}")]
    InvalidSpec(String),
    /// A registered option already uses the short or long name.
    #[error("option already registered: {0}")]
    DuplicateOption(String),
}

/// Invalid [`ParserConfig`](crate::ParserConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The named prefix (`"long"` or `"short"`) is the empty string.
    #[error("{0} option prefix cannot be empty")]
    EmptyPrefix(&'static str),
}

/// Caller misuse of a lookup API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A long-name lookup was given the empty string.
    #[error("long option name cannot be empty")]
    EmptyLongName,
}

/// Why a parse was rejected. Only visible inside the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FailureReason {
    UnknownOption(String),
    MalformedToken(String),
    ValueNotAllowed(String),
    MissingRequiredValue(String),
    DuplicateOption(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption(name) => write!(f, "unknown option {name}"),
            Self::MalformedToken(body) => write!(f, "more than one separator in {body:?}"),
            Self::ValueNotAllowed(name) => write!(f, "option {name} takes no value"),
            Self::MissingRequiredValue(name) => write!(f, "option {name} requires a value"),
            Self::DuplicateOption(name) => write!(f, "option {name} given more than once"),
        }
    }
}

/// The input is not a valid invocation.
///
/// Carries no public discriminant; the cause is logged at `debug` level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse command line")]
pub struct ParseFailure {
    reason: FailureReason,
}

impl ParseFailure {
    pub(crate) fn new(reason: FailureReason) -> Self {
        Self { reason }
    }

    pub(crate) fn reason(&self) -> &FailureReason {
        &self.reason
    }
}

/// Errors that can occur while loading a
/// [`ParserDefinition`](crate::ParserDefinition).
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported definition format: {0}")]
    UnsupportedFormat(String),

    /// The configuration section is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An option could not be registered.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Convenience alias for results with [`DefinitionError`].
pub type Result<T> = std::result::Result<T, DefinitionError>;
