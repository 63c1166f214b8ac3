use anyhow::{bail, Result};

use super::{Credentials, SIGN_IN_HINT};
use crate::auth::{Navigation, Route};
use crate::state::AppState;

pub async fn signin(state: &AppState, credentials: &Credentials) -> Result<String> {
    if let Navigation::Redirected { .. } = state.guard.enter_public(Route::SignIn).await {
        return Ok("Already signed in. Run `learnhub logout` to switch accounts.\n".to_string());
    }

    let auth = state.auth();
    auth.signin(&credentials.email, &credentials.password)
        .await?;
    let name = auth
        .session()
        .await
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| credentials.email.clone());
    Ok(format!("Signed in as {}.\n", name))
}

pub async fn signup(state: &AppState, credentials: &Credentials) -> Result<String> {
    if let Navigation::Redirected { .. } = state.guard.enter_public(Route::SignUp).await {
        return Ok("Already signed in. Run `learnhub logout` first.\n".to_string());
    }

    let name = credentials.name.as_deref().unwrap_or_default();
    let created = state
        .auth()
        .signup(name, &credentials.email, &credentials.password)
        .await?;
    Ok(format!(
        "{} Run `learnhub signin` to continue.\n",
        created.message
    ))
}

pub async fn logout(state: &AppState) -> String {
    state.auth().logout().await;
    "Signed out.\n".to_string()
}

pub async fn whoami(state: &AppState) -> Result<String> {
    match state.auth().session().await {
        Some(session) => match session.name.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                Ok(format!("{} <{}>\n", name, session.email))
            }
            _ => Ok(format!("{}\n", session.email)),
        },
        None => bail!(SIGN_IN_HINT),
    }
}
