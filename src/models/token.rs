use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key for the access token.
pub const ACCESS_TOKEN: &str = "access_token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// The access/refresh token pair as it sits in the token store.
///
/// No expiry is kept alongside; validity is only ever learned from the
/// backend's answers.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        TokenPair {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// True when neither token is present.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

// Tokens are credentials; keep them out of logs and panics.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |t: &Option<String>| if t.is_some() { "Some(***)" } else { "None" };
        f.debug_struct("TokenPair")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &mask(&self.refresh_token))
            .finish()
    }
}

/// Body returned by `/auth/signin` and `/auth/refresh`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Body sent to `/auth/refresh` and `/auth/logout`.
#[derive(Serialize, Deserialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}
