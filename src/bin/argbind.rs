//! Command-line interface for argbind
//! This binary is used to inspect how argument text is lexed, reduced and bound.
//!
//! Usage:
//!   argbind tokens [--format `<format>`] -- `<args>`...                  - Print the token stream
//!   argbind pairs [--format `<format>`] -- `<args>`...                   - Print alias / raw value pairs
//!   argbind bind --schema `<file>` [--format `<format>`] -- `<args>`...  - Bind against a schema file
//!   argbind normalize -- `<args>`...                                     - Print the canonical argument text

use argbind::argbind::formats::{detokenize, serialize, Format};
use argbind::argbind::lexing::lex_arguments;
use argbind::argbind::parsing::reduce;
use argbind::argbind::schema::{Schema, ValueMap};
use argbind::argbind::Binder;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::error::Error;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let format_arg = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format")
        .value_parser(Format::NAMES.to_vec())
        .default_value("simple");
    let args_arg = Arg::new("args")
        .help("Arguments to process, given after --")
        .num_args(0..)
        .last(true)
        .allow_hyphen_values(true);

    let matches = Command::new("argbind")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting how argument lists are tokenized and bound")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline steps to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream after separator collapsing")
                .arg(format_arg.clone())
                .arg(args_arg.clone()),
        )
        .subcommand(
            Command::new("pairs")
                .about("Print the reduced alias / raw value pairs")
                .arg(format_arg.clone())
                .arg(args_arg.clone()),
        )
        .subcommand(
            Command::new("bind")
                .about("Bind arguments against a schema file and print the slot values")
                .arg(
                    Arg::new("schema")
                        .long("schema")
                        .short('s')
                        .help("Path to a YAML or JSON schema file")
                        .required(true),
                )
                .arg(format_arg)
                .arg(args_arg.clone()),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print the arguments in canonical form: `--` prefixes, quoted values")
                .arg(args_arg),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("pairs", sub)) => handle_pairs_command(sub),
        Some(("bind", sub)) => handle_bind_command(sub),
        Some(("normalize", sub)) => handle_normalize_command(sub),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn collect_args(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn selected_format(matches: &ArgMatches) -> Result<Format, Box<dyn Error>> {
    let name = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple");
    Ok(name.parse()?)
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let tokens = lex_arguments(&collect_args(matches))?;
    Ok(serialize(&tokens, selected_format(matches)?)?)
}

/// Handle the pairs command
fn handle_pairs_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let tokens = lex_arguments(&collect_args(matches))?;
    let parsed = reduce(tokens)?;
    Ok(serialize(&parsed, selected_format(matches)?)?)
}

/// Handle the bind command
fn handle_bind_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let path = matches
        .get_one::<String>("schema")
        .ok_or("missing --schema")?;
    let schema = load_schema(Path::new(path))?;
    let binder = Binder::with_options(&schema.parameters, schema.options)?;

    let mut values = ValueMap::new();
    binder.parse(&collect_args(matches), &mut values)?;
    Ok(serialize(&values, selected_format(matches)?)?)
}

/// Handle the normalize command
fn handle_normalize_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let tokens = lex_arguments(&collect_args(matches))?;
    Ok(format!("{}\n", detokenize(&tokens)))
}

fn load_schema(path: &Path) -> Result<Schema, Box<dyn Error>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading schema {}: {}", path.display(), e))?;
    let schema = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Schema::from_json(&source)?,
        _ => Schema::from_yaml(&source)?,
    };
    Ok(schema)
}
