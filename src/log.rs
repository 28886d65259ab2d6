//! The `log` module provides initialisation and configuration of the application's logging system.
//!
//! Messages go to the terminal (coloured when attached to one) and, for commands which produce
//! output files, to log files alongside the results. The log level is taken from the
//! `RAINWISE_LOG_LEVEL` environment variable if set, otherwise from the settings file.
use anyhow::{Context, Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// A flag indicating whether the logger has been initialised
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The default log level for the program.
///
/// Used as a fallback if the user hasn't specified something else with the RAINWISE_LOG_LEVEL
/// environment variable or the settings.toml file.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The environment variable which overrides the log level
const LOG_LEVEL_ENV_VAR: &str = "RAINWISE_LOG_LEVEL";

/// The file name for the log file containing messages about an ordinary run
const LOG_INFO_FILE_NAME: &str = "rainwise_info.log";

/// The file name for the log file containing warnings and error messages
const LOG_ERROR_FILE_NAME: &str = "rainwise_error.log";

/// The log target prefix for messages from this crate
const CRATE_TARGET: &str = "rainwise";

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Initialise the program logger using the `fern` logging library with colourised output.
///
/// The user can specify their preferred logging level via the `settings.toml` file (defaulting to
/// `info` if not present) or with the `RAINWISE_LOG_LEVEL` environment variable. If both are
/// provided, the environment variable takes precedence.
///
/// Possible log level options are:
///
/// * `off`
/// * `error`
/// * `warn`
/// * `info`
/// * `debug`
/// * `trace`
///
/// # Arguments
///
/// * `log_level_from_settings`: The log level specified in `settings.toml`
/// * `log_file_path`: The folder to save log files in (if Some, log files will be created)
pub fn init(log_level_from_settings: &str, log_file_path: Option<&Path>) -> Result<()> {
    let log_level = env::var(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| log_level_from_settings.to_string());
    let log_level = parse_log_level(&log_level)?;

    let mut dispatch = terminal_dispatch(log_level);
    if let Some(log_file_path) = log_file_path {
        dispatch = dispatch.chain(file_dispatch(log_level, log_file_path)?);
    }
    dispatch.apply()?;

    // Set a flag to indicate that the logger has been initialised
    LOGGER_INIT.get_or_init(|| ());

    Ok(())
}

/// Messages for the terminal: warnings and errors to stderr, everything else to stdout
fn terminal_dispatch(log_level: LevelFilter) -> Dispatch {
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    // Only use colours if the output is a terminal
    let use_colour_stdout = std::io::stdout().is_terminal();
    let use_colour_stderr = std::io::stderr().is_terminal();

    Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stdout, &colours);
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stderr, &colours);
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        )
}

/// Messages for the log files in the output folder.
///
/// The info log always records at least `info` messages, so that a run can be reviewed even if
/// the terminal was quiet. The error log records warnings and errors.
fn file_dispatch(log_level: LevelFilter, log_file_path: &Path) -> Result<Dispatch> {
    let new_log_file = |file_name: &str| {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(log_file_path.join(file_name))
            .with_context(|| format!("Could not create log file {file_name}"))
    };

    Ok(Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(write_log_plain)
                .level(log_level.max(LevelFilter::Info))
                .chain(new_log_file(LOG_INFO_FILE_NAME)?),
        )
        .chain(
            Dispatch::new()
                .format(write_log_plain)
                .level(LevelFilter::Warn)
                .chain(new_log_file(LOG_ERROR_FILE_NAME)?),
        ))
}

/// Convert a log level name (case-insensitive) into a [`LevelFilter`]
pub(crate) fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    let level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// The module path to show in log messages.
///
/// Messages from this crate are shown by module (e.g. `engine`), those from other crates in full.
fn short_target(target: &str) -> &str {
    match target.strip_prefix(CRATE_TARGET) {
        Some("") => "main",
        Some(module) => module.trim_start_matches("::"),
        None => target,
    }
}

/// Write to the log in the format we want for rainwise
fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");
    let target = short_target(target);

    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

/// Write to the log with no colours
fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

/// Write to the log with optional colours
fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    // Format output with or without colour based on `use_colour`
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}
