pub mod ai;
pub mod auth;
pub mod navigate;
pub mod resources;
pub mod taxonomy;

// Internal "interpreter" for `Action`.
mod run;

use std::fmt;

use anyhow::{bail, Result};

use crate::auth::{Navigation, Route};
use crate::cli::globals::GlobalArgs;
use crate::models::TaxonomyKind;
use crate::state::AppState;
use crate::views::{Screen, ViewState};

pub const SIGN_IN_HINT: &str = "not signed in, run `learnhub signin` first";

/// Email and password, plus a display name for sign-up.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
pub enum Action {
    Signin(Credentials),
    Signup(Credentials),
    Logout,
    Whoami,
    Home,
    Stats,
    Open(String),
    Schema,
    Resources(resources::ResourceCommand),
    Taxonomy(TaxonomyKind, taxonomy::TaxonomyCommand),
    Ai(ai::AiCommand),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        run::execute(self, globals).await
    }
}

/// Enters a protected screen, or fails with a sign-in hint.
pub(crate) async fn require(state: &AppState, route: Route) -> Result<()> {
    match state.guard.enter(route).await {
        Navigation::Authorized(_) => Ok(()),
        _ => bail!(SIGN_IN_HINT),
    }
}

/// The rendered screen, or its error as a failure.
pub(crate) fn show<S: Screen>(screen: &S) -> Result<String> {
    match screen.state() {
        ViewState::Error { detail } => bail!("{}", detail),
        _ => Ok(crate::views::render(screen)),
    }
}

/// Runs an action against an already built state and returns what would be
/// printed.
/// # Errors
/// Returns an error if the action fails.
pub async fn perform(action: Action, state: &AppState) -> Result<String> {
    match action {
        Action::Signin(credentials) => auth::signin(state, &credentials).await,
        Action::Signup(credentials) => auth::signup(state, &credentials).await,
        Action::Logout => Ok(auth::logout(state).await),
        Action::Whoami => auth::whoami(state).await,
        Action::Home => navigate::home(state).await,
        Action::Stats => navigate::stats(state).await,
        Action::Open(path) => navigate::open(state, &path).await,
        Action::Resources(command) => resources::execute(state, command).await,
        Action::Taxonomy(kind, command) => taxonomy::execute(state, kind, command).await,
        Action::Ai(command) => ai::execute(state, command).await,
        Action::Schema => Ok(format!("{}\n", crate::config::schema_json()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenPair;
    use crate::state::test_state;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_schema_needs_no_backend() {
        let mut server = Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let state = test_state(&server, TokenPair::default());

        let out = perform(Action::Schema, &state).await.unwrap();
        assert!(out.contains("\"1.0.0\""));
        assert!(out.contains("\"base_url\""));
        any.assert_async().await;
    }
}
