use crate::cli::{actions::Action, commands, dispatch::handler, globals::GlobalArgs};
use anyhow::Result;

/// Parses the command line into the global options and the action to run.
pub fn start() -> Result<(GlobalArgs, Action)> {
    let matches = commands::new().get_matches();
    handler(&matches)
}
