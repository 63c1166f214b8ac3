use clap::{builder::ValueParser, Arg, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<String, String> {
        let level = level.to_lowercase();
        match level.as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => Ok(level),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .long("log-level")
            .help("Log level: OFF, ERROR, WARN, INFO, DEBUG, TRACE (default: from config)")
            .env("LEARNHUB_LOG_LEVEL")
            .global(true)
            .value_parser(validator_log_level()),
    )
}
