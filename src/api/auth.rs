use reqwest::header::AUTHORIZATION;
use tracing::{info, warn};

use crate::client::ClientError;
use crate::models::{
    RefreshRequest, Session, SigninRequest, SignupRequest, SignupResponse, TokenResponse,
};
use crate::state::AppState;
use crate::utils::http_helpers::{bearer, error_from_response, read_json};

/// Account endpoints under `/auth`.
///
/// These talk to the backend directly rather than through the gateway: a 401
/// from sign-in means bad credentials, not an expired token to refresh.
pub struct AuthApi<'a> {
    state: &'a AppState,
}

impl<'a> AuthApi<'a> {
    pub fn new(state: &'a AppState) -> Self {
        AuthApi { state }
    }

    /// Exchanges credentials for a token pair and stores it.
    pub async fn signin(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .state
            .http
            .post(self.state.config.api.url("/auth/signin"))
            .json(&SigninRequest { email, password })
            .send()
            .await?;
        let tokens: TokenResponse = read_json(response).await?;
        self.state
            .store
            .save(&tokens.access_token, &tokens.refresh_token);
        info!(
            event_name = "auth.signin.succeeded",
            event_domain = "auth",
            email,
            "signed in"
        );
        Ok(())
    }

    /// Creates an account. Does not sign in.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ClientError> {
        let response = self
            .state
            .http
            .post(self.state.config.api.url("/auth/signup"))
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await?;
        let created: SignupResponse = read_json(response).await?;
        info!(
            event_name = "auth.signup.succeeded",
            event_domain = "auth",
            user_id = created.user_id,
            "account created"
        );
        Ok(created)
    }

    /// Tells the backend to forget the refresh token, then clears local
    /// tokens. The local clear happens whatever the backend says.
    pub async fn logout(&self) {
        let tokens = self.state.store.get();
        if let (Some(access_token), Some(refresh_token)) =
            (tokens.access_token.as_deref(), tokens.refresh_token.as_deref())
        {
            if let Err(e) = self.revoke(access_token, refresh_token).await {
                warn!(
                    event_name = "auth.logout.remote_failed",
                    event_domain = "auth",
                    "logout call failed: {}",
                    e
                );
            }
        }
        self.state.store.clear();
        info!(event_name = "auth.logout", event_domain = "auth", "signed out");
    }

    /// The current identity, refreshing once if needed.
    pub async fn session(&self) -> Option<Session> {
        self.state.verifier.current_session().await
    }

    async fn revoke(&self, access_token: &str, refresh_token: &str) -> Result<(), ClientError> {
        let response = self
            .state
            .http
            .post(self.state.config.api.url("/auth/logout"))
            .header(AUTHORIZATION, bearer(access_token))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::TokenPair;
    use crate::state::test_state;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_signin_saves_tokens() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/signin")
            .match_body(Matcher::Json(json!({"email": "ada@example.com", "password": "hunter22"})))
            .with_status(200)
            .with_body(r#"{"access_token": "a1", "refresh_token": "r1", "token_type": "bearer"}"#)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::default());
        state
            .auth()
            .signin("ada@example.com", "hunter22")
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(state.store.get(), TokenPair::new("a1", "r1"));
    }

    /// Bad credentials are reported, never treated as an expired session.
    #[tokio::test]
    async fn test_signin_bad_credentials_does_not_refresh() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/signin")
            .with_status(401)
            .with_body(r#"{"detail": "Invalid email or password"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("old-a", "old-r"));
        let err = state
            .auth()
            .signin("ada@example.com", "wrong")
            .await
            .unwrap_err();

        refresh.assert_async().await;
        assert_eq!(err.detail(), "Invalid email or password");
        assert_eq!(state.store.get(), TokenPair::new("old-a", "old-r"));
    }

    #[tokio::test]
    async fn test_signup_surfaces_backend_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/signup")
            .with_status(400)
            .with_body(r#"{"detail": "Email already registered"}"#)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::default());
        let err = state
            .auth()
            .signup("Ada", "ada@example.com", "hunter22")
            .await
            .unwrap_err();
        assert_eq!(err.detail(), "Email already registered");
    }

    #[tokio::test]
    async fn test_logout_clears_tokens_even_if_backend_fails() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/logout")
            .match_header("authorization", "Bearer a1")
            .match_body(Matcher::Json(json!({"refresh_token": "r1"})))
            .with_status(500)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::new("a1", "r1"));
        state.auth().logout().await;

        m.assert_async().await;
        assert!(state.store.get().is_empty());
    }

    #[tokio::test]
    async fn test_logout_without_tokens_makes_no_call() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/logout")
            .expect(0)
            .create_async()
            .await;

        let state = test_state(&server, TokenPair::default());
        state.auth().logout().await;
        m.assert_async().await;
    }
}
