mod ai;
mod auth;
mod logging;
mod resources;
mod taxonomy;

pub use logging::ARG_VERBOSITY;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_CONFIG: &str = "config";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("learnhub")
        .about("Track learning resources from the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_CONFIG)
                .short('c')
                .long("config")
                .help("Path to the YAML configuration file")
                .env("LEARNHUB_CONFIG")
                .default_value("config.yaml")
                .global(true),
        )
        .subcommand(
            Command::new("home").about("Show the dashboard with counts and progress statistics"),
        )
        .subcommand(Command::new("stats").about("Show progress statistics"))
        .subcommand(
            Command::new("open")
                .about("Open a screen by path, e.g. /resources/5 or /settings/types")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(Command::new("schema").about("Print the configuration JSON schema"));

    let command = auth::with_subcommands(command);
    let command = resources::with_subcommands(command);
    let command = taxonomy::with_subcommands(command);
    let command = ai::with_subcommands(command);
    logging::with_args(command)
}
