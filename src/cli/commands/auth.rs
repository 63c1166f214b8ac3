use clap::{Arg, Command};

pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("signin")
                .about("Sign in and store the session tokens")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account (sign in afterwards)")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Display name")
                        .required(true),
                )
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Revoke the session and forget the tokens"))
        .subcommand(Command::new("whoami").about("Show the signed-in account"))
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .env("LEARNHUB_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .env("LEARNHUB_PASSWORD")
        .hide_env_values(true)
        .required(true)
}
