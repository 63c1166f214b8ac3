use std::fmt::Write as _;

use anyhow::{bail, Result};

use super::{require, show, SIGN_IN_HINT};
use crate::auth::{Navigation, Route};
use crate::models::TaxonomyKind;
use crate::state::AppState;
use crate::views::{
    DashboardScreen, ResourceDetailScreen, ResourceFilter, ResourceListScreen, TaxonomyScreen,
};

pub async fn home(state: &AppState) -> Result<String> {
    require(state, Route::Home).await?;
    dashboard(state).await
}

async fn dashboard(state: &AppState) -> Result<String> {
    let screen = DashboardScreen::load(state).await;
    if screen.redirect().is_some() {
        bail!(SIGN_IN_HINT);
    }
    show(&screen)
}

pub async fn stats(state: &AppState) -> Result<String> {
    require(state, Route::Home).await?;
    let stats = state.resources().stats().await?;
    let mut out = String::new();
    let _ = writeln!(out, "Total resources:   {}", stats.total_resources);
    let _ = writeln!(out, "Completed:         {}", stats.completed_resources);
    let _ = writeln!(out, "In progress:       {}", stats.in_progress_resources);
    let _ = writeln!(out, "Not started:       {}", stats.not_started_resources);
    let _ = writeln!(out, "Completion rate:   {:.1}%", stats.completion_rate);
    let _ = writeln!(out, "Estimated hours:   {}", stats.total_estimated_hours);
    let _ = writeln!(out, "Hours spent:       {}", stats.total_hours_spent);
    Ok(out)
}

/// Navigates to a path the way the app's router would, then renders
/// whatever screen the guard settles on.
pub async fn open(state: &AppState, path: &str) -> Result<String> {
    let route = Route::parse(path);
    let navigation = if route.requires_auth() {
        state.guard.enter(route).await
    } else {
        state.guard.enter_public(route).await
    };

    match navigation {
        Navigation::Authorized(route) => render_route(state, route).await,
        Navigation::Redirected { to: Route::SignIn, .. } => bail!(SIGN_IN_HINT),
        Navigation::Redirected { to, .. } => render_route(state, to).await,
        Navigation::Pending(_) => bail!("navigation did not resolve"),
    }
}

async fn render_route(state: &AppState, route: Route) -> Result<String> {
    match route {
        Route::SignIn => {
            Ok("Sign in with `learnhub signin --email <EMAIL> --password <PASSWORD>`.\n".to_string())
        }
        Route::SignUp => Ok(
            "Create an account with `learnhub signup --name <NAME> --email <EMAIL> --password <PASSWORD>`.\n"
                .to_string(),
        ),
        Route::Home => dashboard(state).await,
        Route::Resources => show(&ResourceListScreen::load(state, &ResourceFilter::default()).await),
        Route::ResourceDetail(id) => show(&ResourceDetailScreen::load(state, id).await),
        Route::ResourceEdit(id) => {
            let detail = show(&ResourceDetailScreen::load(state, id).await)?;
            Ok(format!(
                "{}\nEdit with `learnhub resources update {} --<field> <value>`.\n",
                detail, id
            ))
        }
        Route::Types => show(&TaxonomyScreen::load(state, TaxonomyKind::Type).await),
        Route::Platforms => show(&TaxonomyScreen::load(state, TaxonomyKind::Platform).await),
    }
}
