//! Usage text rendering.
//!
//! Pure presentation over option metadata: the formatter never parses.
//!
//! # Examples
//!
//! ```
//! use optparse_core::{OptionSpec, UsageBuilder, UseCaseArg};
//!
//! let options = vec![
//!     OptionSpec::required(Some('s'), Some("saas"))
//!         .with_value_name("SAASVAL")
//!         .with_description("SAAS value"),
//!     OptionSpec::flag(Some('x'), Some("xxxx")).hidden(),
//!     OptionSpec::flag(None, Some("very-long-option-name")).with_description("hoge"),
//! ];
//! let mut usage = UsageBuilder::new("cmd", options).with_summary("Summary");
//! let common = usage
//!     .new_use_case()
//!     .with_summary("Common usage")
//!     .arg(UseCaseArg::new("OPTIONS").optional().multiple());
//! let help = usage.new_use_case().with_summary("Help").arg(UseCaseArg::new("--help"));
//! usage.add_use_case(common);
//! usage.add_use_case(help);
//!
//! assert_eq!(
//!     usage.render(),
//!     "Summary\n\
//!      \n\
//!      Usage: cmd [OPTIONS]...  Common usage\n   \
//!      or: cmd --help        Help\n\
//!      \n\
//!      Arguments:\n  \
//!      -s, --saas SAASVAL           SAAS value\n      \
//!      --very-long-option-name  hoge\n"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LONG_PREFIX, DEFAULT_SHORT_PREFIX};
use crate::{OptionSpec, ValueKind};

/// One argument in a use-case line, e.g. `[--level[=N]]...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UseCaseArg {
    /// Literal text (an option key or a placeholder).
    pub name: String,
    /// Rendered inside `[...]`.
    pub optional: bool,
    /// Followed by `...`.
    pub multiple: bool,
    /// Value placeholder following the name.
    pub value: Option<String>,
    /// Value rendered inside `[...]`.
    pub value_optional: bool,
}

impl UseCaseArg {
    /// Creates a required, single argument.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Marks the argument as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the argument as repeatable.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Adds a value placeholder.
    pub fn with_value(mut self, value_name: &str, optional: bool) -> Self {
        self.value = Some(value_name.to_string());
        self.value_optional = optional;
        self
    }

    fn render(&self, separator: char) -> String {
        let mut out = self.name.clone();
        if let Some(value) = &self.value {
            if self.value_optional {
                out.push('[');
            }
            out.push(separator);
            out.push_str(value);
            if self.value_optional {
                out.push(']');
            }
        }
        if self.optional {
            out = format!("[{out}]");
        }
        // `...` stays outside the brackets
        if self.multiple {
            out.push_str("...");
        }
        out
    }
}

/// One `Usage:` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UseCase {
    /// Command name printed first; omitted when empty.
    pub command: String,
    /// Arguments after the command.
    pub args: Vec<UseCaseArg>,
    /// Text printed after the aligned argument list.
    pub summary: Option<String>,
}

impl UseCase {
    /// Creates a use case for `command`.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            ..Default::default()
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: UseCaseArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    fn render(&self, separator: char) -> String {
        let command = Some(self.command.clone()).filter(|c| !c.is_empty());
        command
            .into_iter()
            .chain(self.args.iter().map(|arg| arg.render(separator)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builds usage text for a command.
#[derive(Debug, Clone)]
pub struct UsageBuilder {
    command: String,
    options: Vec<OptionSpec>,
    short_prefix: String,
    long_prefix: String,
    summary: Option<String>,
    separator: char,
    use_cases: Vec<UseCase>,
}

impl UsageBuilder {
    /// Creates a builder for `command`. Options hidden from usage are
    /// dropped here.
    pub fn new(command: &str, options: impl IntoIterator<Item = OptionSpec>) -> Self {
        Self {
            command: command.to_string(),
            options: options
                .into_iter()
                .filter(|option| option.visible_in_usage)
                .collect(),
            short_prefix: DEFAULT_SHORT_PREFIX.to_string(),
            long_prefix: DEFAULT_LONG_PREFIX.to_string(),
            summary: None,
            separator: ' ',
            use_cases: Vec::new(),
        }
    }

    /// Sets the prefixes printed before option names.
    pub fn with_prefixes(mut self, short_prefix: &str, long_prefix: &str) -> Self {
        self.short_prefix = short_prefix.to_string();
        self.long_prefix = long_prefix.to_string();
        self
    }

    /// Sets the command summary printed first.
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    /// Sets the key/value separator shown between an option and its value.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Starts a use case for this builder's command.
    pub fn new_use_case(&self) -> UseCase {
        UseCase::new(&self.command)
    }

    /// Appends a use case.
    pub fn add_use_case(&mut self, use_case: UseCase) {
        self.use_cases.push(use_case);
    }

    /// Renders the usage text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn option_left_column(&self, option: &OptionSpec) -> String {
        let mut out = String::new();
        match option.short_name {
            Some(short) => {
                out.push_str(&self.short_prefix);
                out.push(short);
                if option.long_name.is_some() {
                    out.push_str(", ");
                }
            }
            // blank where "-x, " would be
            None => out.push_str(&" ".repeat(self.short_prefix.chars().count() + 3)),
        }
        if let Some(long) = &option.long_name {
            out.push_str(&self.long_prefix);
            out.push_str(long);
        }
        if let Some(value_name) = option.value_name.as_deref().filter(|v| !v.is_empty()) {
            let optional = option.value_kind == ValueKind::Optional;
            if self.separator.is_whitespace() {
                // KEY [VAL]
                out.push(self.separator);
                if optional {
                    out.push('[');
                }
            } else {
                // KEY[=VAL]
                if optional {
                    out.push('[');
                }
                out.push(self.separator);
            }
            out.push_str(value_name);
            if optional {
                out.push(']');
            }
        }
        out
    }
}

impl fmt::Display for UsageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(summary) = self.summary.as_deref().filter(|s| !s.is_empty()) {
            writeln!(f, "{summary}")?;
            writeln!(f)?;
        }

        if !self.use_cases.is_empty() {
            let lines: Vec<String> = self
                .use_cases
                .iter()
                .map(|use_case| use_case.render(self.separator))
                .collect();
            let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            for (i, (line, use_case)) in lines.iter().zip(&self.use_cases).enumerate() {
                let label = if i == 0 { "Usage: " } else { "   or: " };
                let summary = use_case.summary.as_deref().unwrap_or("");
                writeln!(f, "{label}{line:<width$}  {summary}")?;
            }
            writeln!(f)?;
        }

        if !self.options.is_empty() {
            writeln!(f, "Arguments:")?;
            let columns: Vec<String> = self
                .options
                .iter()
                .map(|option| self.option_left_column(option))
                .collect();
            let width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
            for (column, option) in columns.iter().zip(&self.options) {
                writeln!(f, "  {column:<width$}  {}", option.description)?;
            }
        }

        Ok(())
    }
}
