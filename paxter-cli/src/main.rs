//! Command-line interface for paxter
//! This binary parses paxter sources and shows the tree, or renders them with the default environment.
//!
//! Usage:
//!   paxter parse [-i `<file>`] [-o `<file>`] [-s `<char>`] [-f json|yaml|treeviz]   - Show the parsed tree
//!   paxter html [-i `<file>`] [-o `<file>`] [-s `<char>`]                           - Render the source
//!
//! Input defaults to stdin and output to stdout. Set `RUST_LOG` (or pass `--verbose`) to see what
//! the parser and interpreter are doing.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use paxter_parser::paxter::error::format_source_context;
use paxter_parser::paxter::formats::{FormatError, FormatRegistry};
use paxter_parser::paxter::parsing::Parser;
use paxter_parser::paxter::presets::{default_environment, run_with};
use paxter_parser::PaxterError;
use std::io::{self, Read, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {error}")]
    Read { path: String, error: io::Error },

    #[error("cannot write {path}: {error}")]
    Write { path: String, error: io::Error },

    #[error("{error}")]
    Paxter { error: PaxterError, text: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub),
        Some(("html", sub)) => handle_html_command(sub),
        _ => Ok(()),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        if let CliError::Paxter { error, text } = &err {
            if let Some(offset) = error.offset() {
                eprintln!();
                eprint!("{}", format_source_context(text, offset));
            }
        }
        std::process::exit(1);
    }
}

fn io_args() -> [Arg; 3] {
    [
        Arg::new("input")
            .long("input")
            .short('i')
            .help("Source file to read (default: stdin)"),
        Arg::new("output")
            .long("output")
            .short('o')
            .help("File to write (default: stdout)"),
        Arg::new("switch")
            .long("switch")
            .short('s')
            .help("Character introducing commands")
            .value_parser(value_parser!(char))
            .default_value("@"),
    ]
}

fn build_cli() -> Command {
    Command::new("paxter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and render paxter documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser and interpreter activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse the source and print its tree")
                .args(io_args())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Tree format")
                        .value_parser(["json", "yaml", "treeviz"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("html")
                .about("Parse and render the source with the default environment")
                .args(io_args()),
        )
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) -> Result<(), CliError> {
    let source = read_input(matches)?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json");

    let mut parser = build_parser(matches, &source)?;
    let tree = parser.parse(&source).map_err(|error| CliError::Paxter {
        error,
        text: source.clone(),
    })?;
    let mut output = FormatRegistry::default().serialize(&tree, format)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    write_output(matches, &output)
}

/// Handle the html command
fn handle_html_command(matches: &ArgMatches) -> Result<(), CliError> {
    let source = read_input(matches)?;
    let mut parser = build_parser(matches, &source)?;
    let mut env = default_environment();
    let rendered = run_with(&mut parser, &source, &mut env).map_err(|error| CliError::Paxter {
        error,
        text: source.clone(),
    })?;
    write_output(matches, &rendered.render())
}

fn build_parser(matches: &ArgMatches, source: &str) -> Result<Parser, CliError> {
    let switch = matches.get_one::<char>("switch").copied().unwrap_or('@');
    debug!(%switch, "building parser");
    Parser::with_switch(switch).map_err(|error| CliError::Paxter {
        error,
        text: source.to_string(),
    })
}

fn read_input(matches: &ArgMatches) -> Result<String, CliError> {
    match matches.get_one::<String>("input") {
        Some(path) => std::fs::read_to_string(path).map_err(|error| CliError::Read {
            path: path.clone(),
            error,
        }),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|error| CliError::Read {
                    path: "stdin".to_string(),
                    error,
                })?;
            Ok(source)
        }
    }
}

fn write_output(matches: &ArgMatches, output: &str) -> Result<(), CliError> {
    match matches.get_one::<String>("output") {
        Some(path) => std::fs::write(path, output).map_err(|error| CliError::Write {
            path: path.clone(),
            error,
        }),
        None => io::stdout()
            .write_all(output.as_bytes())
            .map_err(|error| CliError::Write {
                path: "stdout".to_string(),
                error,
            }),
    }
}

/// Send tracing output to stderr when `RUST_LOG` is set, or at debug level with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}
