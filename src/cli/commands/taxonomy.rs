use clap::{value_parser, Arg, Command};

pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(taxonomy_command("types", "resource types"))
        .subcommand(taxonomy_command("platforms", "resource platforms"))
}

fn taxonomy_command(name: &'static str, label: &'static str) -> Command {
    Command::new(name)
        .about(format!("List and manage {}", label))
        .subcommand_required(true)
        .subcommand(Command::new("list").about(format!("List {}", label)))
        .subcommand(
            Command::new("create")
                .about("Add an entry")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename an entry")
                .arg(id_arg())
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete an entry that no resource uses")
                .arg(id_arg()),
        )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
}
