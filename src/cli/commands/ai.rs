use clap::{value_parser, Arg, Command};

const LIMIT_HELP: &str = "How many recommendations to ask for [default: 5]";

pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new("ai")
            .about("AI study helpers")
            .subcommand_required(true)
            .subcommand(
                Command::new("recommend")
                    .about("Suggest what to study next")
                    .arg(
                        Arg::new("limit")
                            .short('n')
                            .long("limit")
                            .help(LIMIT_HELP)
                            .value_parser(value_parser!(u32).range(1..=20)),
                    ),
            )
            .subcommand(resource_command("summarize", "Summarize the notes of a resource"))
            .subcommand(resource_command("predict", "Predict when a resource will be mastered"))
            .subcommand(resource_command("categorize", "Categorize and tag a resource"))
            .subcommand(resource_command("insights", "Show the stored AI insights of a resource")),
    )
}

fn resource_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(
        Arg::new("id")
            .required(true)
            .value_parser(value_parser!(i64)),
    )
}
