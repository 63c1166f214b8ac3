use clap::{builder::ValueParser, value_parser, Arg, ArgAction, Command};

use crate::models::ProgressStatus;

#[must_use]
pub fn status_parser() -> ValueParser {
    ValueParser::from(|raw: &str| -> std::result::Result<ProgressStatus, String> {
        ProgressStatus::parse(raw).ok_or_else(|| {
            format!(
                "unknown status '{}', expected not_started, in_progress or completed",
                raw
            )
        })
    })
}

pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new("resources")
            .about("List and manage learning resources")
            .subcommand_required(true)
            .subcommand(
                Command::new("list")
                    .about("List resources")
                    .arg(
                        Arg::new("search")
                            .short('s')
                            .long("search")
                            .help("Case-insensitive match on name or description"),
                    )
                    .arg(
                        Arg::new("status")
                            .long("status")
                            .help("Only resources with this status")
                            .value_parser(status_parser()),
                    ),
            )
            .subcommand(Command::new("show").about("Show one resource").arg(id_arg()))
            .subcommand(
                with_field_args(Command::new("create").about("Add a resource"))
                    .arg(Arg::new("name").required(true)),
            )
            .subcommand(
                with_field_args(Command::new("update").about("Change fields of a resource"))
                    .arg(id_arg())
                    .arg(Arg::new("name").long("name").help("New name")),
            )
            .subcommand(
                Command::new("delete")
                    .about("Delete a resource")
                    .arg(id_arg()),
            ),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn with_field_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("type-id")
                .long("type-id")
                .help("Resource type id (see `learnhub types list`)")
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("platform-id")
                .long("platform-id")
                .help("Platform id (see `learnhub platforms list`)")
                .value_parser(value_parser!(i64)),
        )
        .arg(Arg::new("description").long("description"))
        .arg(Arg::new("notes").long("notes"))
        .arg(
            Arg::new("rating")
                .long("rating")
                .help("1 to 5")
                .value_parser(value_parser!(i32).range(1..=5)),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("not_started, in_progress or completed")
                .value_parser(status_parser()),
        )
        .arg(
            Arg::new("estimated-hours")
                .long("estimated-hours")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("hours-spent")
                .long("hours-spent")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the stored resource as JSON")
                .action(ArgAction::SetTrue),
        )
}
