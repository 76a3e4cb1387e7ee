use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Log level names in verbosity order; the index is the `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accept `SULIO_LOG_LEVEL` as a level name (any case) or as a `-v` count.
fn parse_log_level(level: &str) -> Result<u8, String> {
    let level = level.trim().to_lowercase();

    if let Some(index) = LEVELS.iter().position(|name| *name == level) {
        return u8::try_from(index).map_err(|err| err.to_string());
    }

    match level.parse::<u8>() {
        Ok(count) if usize::from(count) < LEVELS.len() => Ok(count),
        _ => Err(format!(
            "unknown log level '{level}', expected one of: {} (or 0-4)",
            LEVELS.join(", ")
        )),
    }
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more: -v warn, -vv info, -vvv debug, -vvvv trace (default: error)")
            .env("SULIO_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
