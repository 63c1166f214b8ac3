use anyhow::{bail, Result};

use super::{require, show};
use crate::auth::Route;
use crate::models::{Resource, ResourceCreate, ResourceUpdate};
use crate::state::AppState;
use crate::views::{ResourceDetailScreen, ResourceFilter, ResourceListScreen};

#[derive(Debug)]
pub enum ResourceCommand {
    List(ResourceFilter),
    Show(i64),
    Create { resource: ResourceCreate, json: bool },
    Update { id: i64, changes: ResourceUpdate, json: bool },
    Delete(i64),
}

fn describe(verb: &str, resource: &Resource, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(resource)?));
    }
    Ok(format!("{} resource #{} {}\n", verb, resource.id, resource.name))
}

pub async fn execute(state: &AppState, command: ResourceCommand) -> Result<String> {
    match command {
        ResourceCommand::List(filter) => {
            require(state, Route::Resources).await?;
            show(&ResourceListScreen::load(state, &filter).await)
        }
        ResourceCommand::Show(id) => {
            require(state, Route::ResourceDetail(id)).await?;
            show(&ResourceDetailScreen::load(state, id).await)
        }
        ResourceCommand::Create { resource, json } => {
            if resource.name.trim().is_empty() {
                bail!("a resource needs a name");
            }
            require(state, Route::Resources).await?;
            let created = state.resources().create(&resource).await?;
            describe("Created", &created, json)
        }
        ResourceCommand::Update { id, changes, json } => {
            if changes.is_empty() {
                bail!("nothing to update, pass at least one field");
            }
            require(state, Route::ResourceEdit(id)).await?;
            let updated = state.resources().update(id, &changes).await?;
            describe("Updated", &updated, json)
        }
        ResourceCommand::Delete(id) => {
            require(state, Route::ResourceDetail(id)).await?;
            state.resources().delete(id).await?;
            Ok(format!("Deleted resource #{}\n", id))
        }
    }
}
