use anyhow::{anyhow, Result};

use super::{require, show};
use crate::auth::Route;
use crate::models::TaxonomyKind;
use crate::state::AppState;
use crate::views::TaxonomyScreen;

#[derive(Debug)]
pub enum TaxonomyCommand {
    List,
    Create(String),
    Rename { id: i64, name: String },
    Delete(i64),
}

fn route_for(kind: TaxonomyKind) -> Route {
    match kind {
        TaxonomyKind::Type => Route::Types,
        TaxonomyKind::Platform => Route::Platforms,
    }
}

pub async fn execute(state: &AppState, kind: TaxonomyKind, command: TaxonomyCommand) -> Result<String> {
    require(state, route_for(kind)).await?;
    let mut screen = TaxonomyScreen::load(state, kind).await;

    let message = match command {
        TaxonomyCommand::List => return show(&screen),
        TaxonomyCommand::Create(name) => {
            let entry = screen
                .create(state, &name)
                .await
                .map_err(|alert| anyhow!(alert.message))?;
            format!("Created {} #{} {}", kind, entry.id, entry.name)
        }
        TaxonomyCommand::Rename { id, name } => {
            let entry = screen
                .rename(state, id, &name)
                .await
                .map_err(|alert| anyhow!(alert.message))?;
            format!("Renamed {} #{} to {}", kind, entry.id, entry.name)
        }
        TaxonomyCommand::Delete(id) => {
            screen
                .delete(state, id)
                .await
                .map_err(|alert| anyhow!(alert.message))?;
            format!("Deleted {} #{}", kind, id)
        }
    };
    Ok(format!("{}\n\n{}", message, show(&screen)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenPair;
    use crate::state::test_state;
    use mockito::Server;

    #[tokio::test]
    async fn test_create_then_lists() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/auth/get_session")
            .with_status(200)
            .with_body(r#"{"name": "Ada", "email": "ada@example.com"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/resource-platforms")
            .with_status(200)
            .with_body(r#"[{"id": 8, "name": "Coursera", "user_id": 1}]"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/resource-platforms")
            .with_status(200)
            .with_body(r#"{"id": 8, "name": "Coursera", "user_id": 1}"#)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("a", "r"));
        let out = execute(
            &state,
            TaxonomyKind::Platform,
            TaxonomyCommand::Create("Coursera".to_string()),
        )
        .await
        .unwrap();
        assert!(out.starts_with("Created resource platform #8 Coursera\n"));
        assert!(out.contains("    8  Coursera"));
    }
}
