use serde::{Deserialize, Serialize};

/// The identity the backend asserts for the current access token
/// (`GET /auth/get_session`). Valid only for the call that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

impl Session {
    /// Name if the account has one, otherwise the email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Serialize, Debug)]
pub struct SigninRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: i64,
}
