use std::path::PathBuf;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::{diagnostics::TracingConfig, result::Result};

// Exit Codes for different types of errors
pub const ERR_CONFIG_ERROR: i32 = 1;
pub const ERR_IO_ERROR: i32 = 2;

/// Where the configuration is read from when neither `--config` nor
/// [`CONFIG_ENV_VAR`] say otherwise.
pub const DEFAULT_CONFIG_PATH: &str = "./linenum.yaml";
pub const CONFIG_ENV_VAR: &str = "LINENUM_CONFIG";

/// Input name which reads from stdin
pub const STDIN: &str = "-";

pub fn configure_cli() -> clap::App<'static, 'static> {
    let app = App::new("linenum")
        .version("0.1.0")
        .about("Prefixes every line of build console output with its line number")
        .arg(
            Arg::with_name("input")
                .multiple(true)
                .help("Console logs to annotate. Each one is numbered independently. Reads stdin when none are given or for '-'."),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("The configuration file that stores whether line numbering is enabled"),
        )
        .arg(
            Arg::with_name("enable")
                .long("enable")
                .conflicts_with("disable")
                .help("Number lines regardless of what the configuration file says"),
        )
        .arg(
            Arg::with_name("disable")
                .long("disable")
                .help("Pass lines through unchanged regardless of what the configuration file says"),
        )
        .arg(
            Arg::with_name("save")
                .long("save")
                .help("Write the effective setting back to the configuration file"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Write the annotated output to this file instead of stdout"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .default_value("warn")
                .help("The level of diagnostic messages written to stderr"),
        )
        .arg(
            Arg::with_name("trace-annotator")
                .long("trace-annotator")
                .takes_value(true)
                .help("Traces every line the annotator produces within the given range (all, N, A-B, <N, >N).
                Trace records are only shown with --log-level trace."),
        );
    app
}

pub fn get_log_level(args: &ArgMatches) -> Option<LevelFilter> {
    args.value_of("log-level")
        .and_then(|level| LevelFilter::from_str(level).ok())
}

pub fn configure_logging(level: LevelFilter) -> std::result::Result<(), log::SetLoggerError> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

/// The configuration file path from the command line, then the environment,
/// then [`DEFAULT_CONFIG_PATH`].
pub fn get_config_path(args: &ArgMatches) -> PathBuf {
    args.value_of("config")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Returns the value of `--enable`/`--disable` if either was given.
pub fn get_enable_override(args: &ArgMatches) -> Option<bool> {
    if args.is_present("enable") {
        Some(true)
    } else if args.is_present("disable") {
        Some(false)
    } else {
        None
    }
}

pub fn get_inputs<'a>(args: &'a ArgMatches) -> Vec<&'a str> {
    match args.values_of("input") {
        None => vec![STDIN],
        Some(inputs) => inputs.collect(),
    }
}

pub fn get_tracing(args: &ArgMatches) -> Result<TracingConfig> {
    match args.value_of("trace-annotator") {
        None => Ok(TracingConfig::Off),
        Some(range) => range.parse(),
    }
}
