use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::ArgMatches;

use crate::api::DEFAULT_RECOMMENDATION_LIMIT;
use crate::cli::actions::{
    ai::AiCommand, resources::ResourceCommand, taxonomy::TaxonomyCommand, Action, Credentials,
};
use crate::cli::commands::{ARG_CONFIG, ARG_VERBOSITY};
use crate::cli::globals::GlobalArgs;
use crate::models::{ProgressStatus, ResourceCreate, ResourceUpdate, TaxonomyKind};
use crate::views::{AiAction, ResourceFilter};

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<(GlobalArgs, Action)> {
    let config = matches
        .get_one::<String>(ARG_CONFIG)
        .cloned()
        .unwrap_or_else(|| "config.yaml".to_string());
    let globals = GlobalArgs {
        config: PathBuf::from(config),
        log_level: matches.get_one::<String>(ARG_VERBOSITY).cloned(),
    };

    let action = match matches.subcommand() {
        Some(("signin", sub)) => Action::Signin(credentials(sub, false)?),
        Some(("signup", sub)) => Action::Signup(credentials(sub, true)?),
        Some(("logout", _)) => Action::Logout,
        Some(("whoami", _)) => Action::Whoami,
        Some(("home", _)) => Action::Home,
        Some(("stats", _)) => Action::Stats,
        Some(("schema", _)) => Action::Schema,
        Some(("open", sub)) => Action::Open(required(sub, "path")?),
        Some(("resources", sub)) => Action::Resources(resources(sub)?),
        Some(("types", sub)) => Action::Taxonomy(TaxonomyKind::Type, taxonomy(sub)?),
        Some(("platforms", sub)) => Action::Taxonomy(TaxonomyKind::Platform, taxonomy(sub)?),
        Some(("ai", sub)) => Action::Ai(ai(sub)?),
        Some((other, _)) => bail!("unknown command: {}", other),
        None => bail!("no command given, see --help"),
    };
    Ok((globals, action))
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: {}", name))
}

fn id(matches: &ArgMatches) -> Result<i64> {
    matches
        .get_one::<i64>("id")
        .copied()
        .context("missing required argument: id")
}

fn credentials(matches: &ArgMatches, with_name: bool) -> Result<Credentials> {
    Ok(Credentials {
        name: if with_name {
            Some(required(matches, "name")?)
        } else {
            None
        },
        email: required(matches, "email")?,
        password: required(matches, "password")?,
    })
}

fn resources(matches: &ArgMatches) -> Result<ResourceCommand> {
    let command = match matches.subcommand() {
        Some(("list", sub)) => ResourceCommand::List(ResourceFilter {
            search: sub.get_one::<String>("search").cloned(),
            status: sub.get_one::<ProgressStatus>("status").copied(),
        }),
        Some(("show", sub)) => ResourceCommand::Show(id(sub)?),
        Some(("create", sub)) => {
            let fields = fields(sub);
            ResourceCommand::Create {
                resource: ResourceCreate {
                    name: required(sub, "name")?,
                    resource_type_id: fields.resource_type_id,
                    resource_platform_id: fields.resource_platform_id,
                    description: fields.description,
                    notes: fields.notes,
                    rating: fields.rating,
                    progress_status: fields.progress_status,
                    estimated_hours: fields.estimated_hours,
                    hours_spent: fields.hours_spent,
                },
                json: sub.get_flag("json"),
            }
        }
        Some(("update", sub)) => ResourceCommand::Update {
            id: id(sub)?,
            changes: fields(sub),
            json: sub.get_flag("json"),
        },
        Some(("delete", sub)) => ResourceCommand::Delete(id(sub)?),
        _ => bail!("unknown resources command, see `learnhub resources --help`"),
    };
    Ok(command)
}

/// The optional fields shared by create and update.
fn fields(matches: &ArgMatches) -> ResourceUpdate {
    ResourceUpdate {
        name: matches
            .try_get_one::<String>("name")
            .ok()
            .flatten()
            .cloned(),
        resource_type_id: matches.get_one::<i64>("type-id").copied(),
        resource_platform_id: matches.get_one::<i64>("platform-id").copied(),
        description: matches.get_one::<String>("description").cloned(),
        notes: matches.get_one::<String>("notes").cloned(),
        rating: matches.get_one::<i32>("rating").copied(),
        progress_status: matches.get_one::<ProgressStatus>("status").copied(),
        estimated_hours: matches.get_one::<i64>("estimated-hours").copied(),
        hours_spent: matches.get_one::<i64>("hours-spent").copied(),
    }
}

fn taxonomy(matches: &ArgMatches) -> Result<TaxonomyCommand> {
    let command = match matches.subcommand() {
        Some(("list", _)) => TaxonomyCommand::List,
        Some(("create", sub)) => TaxonomyCommand::Create(required(sub, "name")?),
        Some(("rename", sub)) => TaxonomyCommand::Rename {
            id: id(sub)?,
            name: required(sub, "name")?,
        },
        Some(("delete", sub)) => TaxonomyCommand::Delete(id(sub)?),
        _ => bail!("unknown command, see --help"),
    };
    Ok(command)
}

fn ai(matches: &ArgMatches) -> Result<AiCommand> {
    let command = match matches.subcommand() {
        Some(("recommend", sub)) => AiCommand::Recommend {
            limit: sub
                .get_one::<u32>("limit")
                .copied()
                .unwrap_or(DEFAULT_RECOMMENDATION_LIMIT),
        },
        Some(("summarize", sub)) => AiCommand::Run {
            id: id(sub)?,
            action: AiAction::Summarize,
        },
        Some(("predict", sub)) => AiCommand::Run {
            id: id(sub)?,
            action: AiAction::Predict,
        },
        Some(("categorize", sub)) => AiCommand::Run {
            id: id(sub)?,
            action: AiAction::Categorize,
        },
        Some(("insights", sub)) => AiCommand::Insights(id(sub)?),
        _ => bail!("unknown ai command, see `learnhub ai --help`"),
    };
    Ok(command)
}
