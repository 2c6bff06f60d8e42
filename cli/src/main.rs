use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use optparse_core::{ParseOutcome, ParserDefinition};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Exit code for input that the definition's parser rejects.
const EXIT_PARSE_FAILURE: i32 = 2;

/// Output format for `parse` results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "optparse")]
#[command(about = "Parse command-line arguments against an option definition")]
struct Cli {
    /// Log parser decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments given after `--` and print the outcome.
    Parse(ParseArgs),
    /// Print the usage text for a definition.
    Usage(DefinitionArgs),
    /// Load a definition and register its options without parsing.
    Check(DefinitionArgs),
}

#[derive(Debug, Args)]
struct DefinitionArgs {
    /// Definition file (.yaml, .yml or .json).
    #[arg(long)]
    definition: PathBuf,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Definition file (.yaml, .yml or .json).
    #[arg(long)]
    definition: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse.
    #[arg(last = true)]
    args: Vec<String>,
}

/// A failed subcommand and the exit code it maps to.
#[derive(Debug)]
struct CliError {
    message: String,
    code: i32,
}

impl From<String> for CliError {
    fn from(message: String) -> Self {
        Self { message, code: 1 }
    }
}

#[derive(Debug, Serialize)]
struct ParseReport {
    positionals: Vec<String>,
    options: Vec<ResolvedOption>,
}

#[derive(Debug, Serialize)]
struct ResolvedOption {
    name: String,
    value: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Usage(args) => run_usage(args).map_err(CliError::from),
        Command::Check(args) => run_check(args).map_err(CliError::from),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err.message);
        process::exit(err.code);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), CliError> {
    let definition = load_definition(&args.definition)?;
    let parser = definition
        .build_parser()
        .map_err(|err| format!("Invalid definition '{}': {err}", args.definition.display()))?;

    let outcome = parser.parse(&args.args).map_err(|err| CliError {
        message: err.to_string(),
        code: EXIT_PARSE_FAILURE,
    })?;

    let report = build_report(&parser, &outcome)?;
    let rendered = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&report)
            .map_err(|err| format!("Failed to serialize outcome: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&report)
            .map_err(|err| format!("Failed to serialize outcome: {err}"))?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_usage(args: DefinitionArgs) -> Result<(), String> {
    let definition = load_definition(&args.definition)?;
    let parser = definition
        .build_parser()
        .map_err(|err| format!("Invalid definition '{}': {err}", args.definition.display()))?;
    print!("{}", definition.usage(&parser));
    Ok(())
}

fn run_check(args: DefinitionArgs) -> Result<(), String> {
    let definition = load_definition(&args.definition)?;
    let parser = definition
        .build_parser()
        .map_err(|err| format!("Invalid definition '{}': {err}", args.definition.display()))?;
    println!(
        "Definition '{}' is valid: {} option(s) registered.",
        definition.command,
        parser.registry().len()
    );
    Ok(())
}

fn load_definition(path: &Path) -> Result<ParserDefinition, String> {
    let definition = ParserDefinition::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    debug!(
        path = %path.display(),
        command = %definition.command,
        options = definition.options.len(),
        "Loaded definition"
    );
    Ok(definition)
}

/// Lists supplied options in registration order, named with the parser's
/// own prefixes.
fn build_report(
    parser: &optparse_core::Parser,
    outcome: &ParseOutcome,
) -> Result<ParseReport, String> {
    let config = parser.config();
    let mut options = Vec::new();
    for option in parser.registry().options() {
        let supplied = outcome
            .get(&option.identity)
            .map_err(|err| err.to_string())?;
        if let Some(value) = supplied {
            options.push(ResolvedOption {
                name: option
                    .identity
                    .render(&config.short_prefix, &config.long_prefix),
                value: value.map(str::to_string),
            });
        }
    }
    Ok(ParseReport {
        positionals: outcome.positionals().to_vec(),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ParserDefinition {
        ParserDefinition::from_yaml_str(
            "command: demo\noptions:\n  - short: v\n    long: verbose\n  - short: o\n    value: required\n",
        )
        .unwrap()
    }

    #[test]
    fn test_report_follows_registration_order() {
        let definition = definition();
        let parser = definition.build_parser().unwrap();
        let outcome = parser.parse(["-o", "x", "file", "--verbose"]).unwrap();
        let report = build_report(&parser, &outcome).unwrap();

        assert_eq!(report.positionals, vec!["file".to_string()]);
        let names: Vec<&str> = report.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["-v,--verbose", "-o"]);
        assert_eq!(report.options[0].value, None);
        assert_eq!(report.options[1].value.as_deref(), Some("x"));
    }

    #[test]
    fn test_cli_accepts_trailing_args() {
        let cli = Cli::try_parse_from([
            "optparse",
            "parse",
            "--definition",
            "d.yaml",
            "--",
            "-x",
            "--y=1",
        ])
        .unwrap();
        match cli.command {
            Command::Parse(args) => assert_eq!(args.args, vec!["-x", "--y=1"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
