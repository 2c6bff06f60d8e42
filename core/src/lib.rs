//! Command-line argument parsing over a registry of option definitions.
//!
//! This crate splits a sequence of raw tokens into positional parameters and
//! resolved option values:
//!
//! - [`OptionSpec`]: an option with a short and/or long name and a
//!   [`ValueKind`] (no value, required value, optional value).
//! - [`ParserBuilder`] / [`Parser`]: register options once, then parse any
//!   number of token sequences against the frozen registry.
//! - [`ParseOutcome`]: positionals in input order plus the options that
//!   were supplied, queryable by short name, long name, spec or
//!   [`Identity`].
//! - [`UsageBuilder`]: renders help text from the registered options.
//! - [`ParserDefinition`]: the same setup loaded from YAML or JSON.
//!
//! Short options can be clustered (`-ot` is `-o -t`); a value attached to a
//! cluster belongs to its last key. Values are attached with any configured
//! separator (`--name=value`) or, when a space is a separator, given as the
//! next token (`--name value`).
//!
//! # Example
//!
//! ```
//! use optparse_core::*;
//!
//! let mut builder = ParserBuilder::new(ParserConfig::default()).unwrap();
//! builder.register(OptionSpec::flag(Some('v'), Some("verbose"))).unwrap();
//! builder
//!     .register(OptionSpec::required(Some('o'), Some("output")).with_value_name("FILE"))
//!     .unwrap();
//! let parser = builder.build();
//!
//! let outcome = parser.parse(["-vo", "out.txt", "input.txt"]).unwrap();
//! assert!(outcome.has_option("verbose").unwrap());
//! assert_eq!(outcome.value_of('o').unwrap(), Some("out.txt"));
//! assert_eq!(outcome.positionals(), ["input.txt"]);
//!
//! // Missing required value: the whole parse fails
//! assert!(parser.parse(["--output"]).is_err());
//! ```

mod classify;
mod config;
mod definition;
mod engine;
mod error;
mod identity;
mod option;
mod outcome;
mod parser;
mod registry;
mod usage;

pub use config::{DEFAULT_LONG_PREFIX, DEFAULT_SEPARATORS, DEFAULT_SHORT_PREFIX, ParserConfig};
pub use definition::ParserDefinition;
pub use error::{
    ArgumentError, ConfigError, DefinitionError, ParseFailure, RegistrationError, Result,
};
pub use identity::Identity;
pub use option::{OptionSpec, ValueKind};
pub use outcome::{OptionKey, ParseOutcome};
pub use parser::{Parser, ParserBuilder};
pub use registry::{RegisteredOption, Registry, RegistryBuilder};
pub use usage::{UsageBuilder, UseCase, UseCaseArg};
