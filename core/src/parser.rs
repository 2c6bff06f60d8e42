//! The parser.
//!
//! [`ParserBuilder`] collects the configuration and option specs;
//! [`build`](ParserBuilder::build) freezes them into a [`Parser`] whose
//! [`parse`](Parser::parse) can be called any number of times, from any
//! number of threads.

use tracing::debug;

use crate::classify::Classifier;
use crate::engine::ParseRun;
use crate::error::{ConfigError, ParseFailure, RegistrationError};
use crate::registry::{Registry, RegistryBuilder};
use crate::usage::UsageBuilder;
use crate::{OptionSpec, ParseOutcome, ParserConfig};

/// Collects options before parsing starts.
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    config: ParserConfig,
    registry: RegistryBuilder,
}

impl Default for ParserBuilder {
    fn default() -> Self {
        let config = ParserConfig::default();
        let registry = RegistryBuilder::new(config.case_sensitive);
        Self { config, registry }
    }
}

impl ParserBuilder {
    /// Creates a builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration cannot classify
    /// tokens.
    pub fn new(config: ParserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = RegistryBuilder::new(config.case_sensitive);
        Ok(Self { config, registry })
    }

    /// The configuration the parser will use.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Registers an option.
    ///
    /// # Errors
    ///
    /// Everything [`RegistryBuilder::register`] rejects, plus names that
    /// contain one of the configured separators.
    pub fn register(&mut self, spec: OptionSpec) -> Result<(), RegistrationError> {
        if let Some(sep) = self.separator_in_names(&spec) {
            return Err(RegistrationError::InvalidSpec(format!(
                "option name {} contains separator {sep:?}",
                spec.display_name()
            )));
        }
        self.registry.register(spec)
    }

    /// Registers several options, stopping at the first error.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn register_all(
        &mut self,
        specs: impl IntoIterator<Item = OptionSpec>,
    ) -> Result<(), RegistrationError> {
        specs.into_iter().try_for_each(|spec| self.register(spec))
    }

    fn separator_in_names(&self, spec: &OptionSpec) -> Option<char> {
        spec.short_name
            .filter(|&c| self.config.is_separator(c))
            .or_else(|| {
                spec.long_name
                    .as_deref()
                    .and_then(|name| name.chars().find(|&c| self.config.is_separator(c)))
            })
    }

    /// Freezes the registry.
    pub fn build(self) -> Parser {
        Parser {
            config: self.config,
            registry: self.registry.freeze(),
        }
    }
}

/// A frozen parser.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    registry: Registry,
}

impl Parser {
    /// The parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The registered options.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parses a token sequence (without the program name).
    ///
    /// Empty tokens are skipped. Any invalid input aborts the whole parse;
    /// there is no partial result.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure`] for unknown options (unless tolerated),
    /// ambiguous or malformed tokens, values on options that take none,
    /// missing required values, and options given twice.
    pub fn parse<I, S>(&self, args: I) -> Result<ParseOutcome, ParseFailure>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classifier = Classifier::new(&self.registry, &self.config);
        let accepts_space = self.config.accepts_space();
        let mut run = ParseRun::new();

        for arg in args {
            let token = arg.as_ref();
            let step = classifier
                .classify(token)
                .and_then(|class| run.step(token, class, accepts_space));
            if let Err(failure) = step {
                debug!(token, reason = %failure.reason(), "Parse aborted");
                return Err(failure);
            }
        }

        run.finish(self.config.case_sensitive).inspect_err(|failure| {
            debug!(reason = %failure.reason(), "Parse aborted at end of input");
        })
    }

    /// Parses the arguments of the running process, skipping the program
    /// name. Arguments that are not valid UTF-8 are converted lossily.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_env(&self) -> Result<ParseOutcome, ParseFailure> {
        self.parse(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    /// Starts a usage text for `command` listing the visible options.
    pub fn usage_builder(&self, command: &str) -> UsageBuilder {
        UsageBuilder::new(
            command,
            self.registry.options().map(|option| option.spec.clone()),
        )
        .with_prefixes(&self.config.short_prefix, &self.config.long_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureReason;

    fn sample_parser(config: ParserConfig) -> Parser {
        let mut builder = ParserBuilder::new(config).unwrap();
        builder
            .register_all([
                OptionSpec::flag(Some('o'), None),
                OptionSpec::optional(Some('t'), Some("opt-two")),
                OptionSpec::required(None, Some("opt-three")),
            ])
            .unwrap();
        builder.build()
    }

    fn failure(parser: &Parser, args: &[&str]) -> FailureReason {
        parser.parse(args).unwrap_err().reason().clone()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = ParserBuilder::new(ParserConfig::default().with_long_prefix("")).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPrefix("long"));
    }

    #[test]
    fn test_register_rejects_separator_in_name() {
        let mut builder = ParserBuilder::default();
        let err = builder
            .register(OptionSpec::flag(None, Some("a=b")))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidSpec(_)));
        let err = builder.register(OptionSpec::flag(Some('='), None)).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidSpec(_)));
    }

    #[test]
    fn test_failure_reasons() {
        let parser = sample_parser(ParserConfig::default());

        assert!(matches!(failure(&parser, &["-x"]), FailureReason::UnknownOption(_)));
        assert!(matches!(
            failure(&parser, &["--opt-two=a=b"]),
            FailureReason::MalformedToken(_)
        ));
        assert!(matches!(failure(&parser, &["-o=1"]), FailureReason::ValueNotAllowed(_)));
        assert!(matches!(
            failure(&parser, &["--opt-three"]),
            FailureReason::MissingRequiredValue(_)
        ));
        assert!(matches!(
            failure(&parser, &["-o", "-o"]),
            FailureReason::DuplicateOption(_)
        ));
    }

    #[test]
    fn test_duplicate_detected_when_value_is_deferred() {
        let parser = sample_parser(ParserConfig::default());
        assert!(matches!(
            failure(&parser, &["-t", "x", "--opt-two"]),
            FailureReason::DuplicateOption(_)
        ));
    }

    #[test]
    fn test_empty_tokens_are_skipped() {
        let parser = sample_parser(ParserConfig::default());
        let outcome = parser.parse(["", "a", "-t", "", "v"]).unwrap();
        assert_eq!(outcome.positionals(), ["a"]);
        assert_eq!(outcome.value_of('t').unwrap(), Some("v"));
    }

    #[test]
    fn test_usage_builder_uses_registered_options() {
        let parser = sample_parser(ParserConfig::default());
        let text = parser.usage_builder("cmd").render();
        assert!(text.starts_with("Arguments:\n"));
        assert!(text.contains("--opt-three"));
    }
}
