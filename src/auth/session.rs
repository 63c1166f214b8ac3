use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use tracing::{debug, info};

use super::TokenRefresher;
use crate::client::ClientError;
use crate::config::ApiConfig;
use crate::models::Session;
use crate::store::TokenStore;
use crate::utils::http_helpers::{bearer, error_from_response, read_json};

const SESSION_PATH: &str = "/auth/get_session";

/// Anything that can answer "is there a usable session right now?".
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn check_authenticated(&self) -> bool;
}

/// Decides whether the stored tokens still describe a live session by asking
/// the backend's introspection endpoint, refreshing when the access token has
/// been rejected.
#[derive(Clone)]
pub struct SessionVerifier {
    client: reqwest::Client,
    api: ApiConfig,
    store: Arc<dyn TokenStore>,
    refresher: TokenRefresher,
}

impl SessionVerifier {
    pub fn new(
        client: reqwest::Client,
        api: &ApiConfig,
        store: Arc<dyn TokenStore>,
        refresher: TokenRefresher,
    ) -> Self {
        SessionVerifier {
            client,
            api: api.clone(),
            store,
            refresher,
        }
    }

    /// Never fails; every problem degrades to `false`.
    ///
    /// 1. No tokens at all: `false` without touching the network.
    /// 2. Access token accepted by `/auth/get_session`: `true`.
    /// 3. Otherwise, with a refresh token: whatever the refresh yields.
    pub async fn check_authenticated(&self) -> bool {
        let tokens = self.store.get();
        if tokens.is_empty() {
            debug!(
                event_name = "auth.session.no_tokens",
                event_domain = "auth",
                "no tokens stored"
            );
            return false;
        }

        if let Some(access_token) = tokens.access_token.as_deref() {
            match self.verify_access_token(access_token).await {
                Ok(status) => {
                    debug!(
                        event_name = "auth.session.verified",
                        event_domain = "auth",
                        status = status.as_u16(),
                        "session verified"
                    );
                    return true;
                }
                Err(e) => info!(
                    event_name = "auth.session.rejected",
                    event_domain = "auth",
                    "access token invalid, attempting refresh: {}",
                    e
                ),
            }
        }

        if tokens.refresh_token.is_some() {
            return self.refresher.refresh().await;
        }
        false
    }

    /// The identity behind the stored access token. On failure the tokens
    /// are refreshed once and the lookup retried once.
    pub async fn current_session(&self) -> Option<Session> {
        let access_token = self.store.get().access_token?;
        match self.fetch_session(&access_token).await {
            Ok(session) => Some(session),
            Err(e) => {
                debug!(
                    event_name = "auth.session.lookup_failed",
                    event_domain = "auth",
                    "session lookup failed, refreshing: {}",
                    e
                );
                if !self.refresher.refresh().await {
                    return None;
                }
                let access_token = self.store.get().access_token?;
                self.fetch_session(&access_token).await.ok()
            }
        }
    }

    /// Any 2xx from the session endpoint counts, whatever the body holds.
    async fn verify_access_token(&self, access_token: &str) -> Result<StatusCode, ClientError> {
        let response = self
            .client
            .get(self.api.url(SESSION_PATH))
            .header(AUTHORIZATION, bearer(access_token))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(status)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn fetch_session(&self, access_token: &str) -> Result<Session, ClientError> {
        let response = self
            .client
            .get(self.api.url(SESSION_PATH))
            .header(AUTHORIZATION, bearer(access_token))
            .send()
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl Authenticator for SessionVerifier {
    async fn check_authenticated(&self) -> bool {
        SessionVerifier::check_authenticated(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenPair;
    use crate::store::MemoryTokenStore;
    use mockito::Server;

    fn verifier_for(server: &Server, tokens: TokenPair) -> (SessionVerifier, Arc<dyn TokenStore>) {
        let api = ApiConfig {
            base_url: server.url(),
            timeout_in_ms: 5000,
        };
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_tokens(tokens));
        let client = reqwest::Client::new();
        let refresher = TokenRefresher::new(client.clone(), &api, store.clone());
        (
            SessionVerifier::new(client, &api, store.clone(), refresher),
            store,
        )
    }

    #[tokio::test]
    async fn test_no_tokens_no_network() {
        let mut server = Server::new_async().await;
        let session = server
            .mock("GET", "/auth/get_session")
            .expect(0)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let (verifier, _) = verifier_for(&server, TokenPair::default());
        assert!(!verifier.check_authenticated().await);

        session.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_valid_access_token_skips_refresh() {
        let mut server = Server::new_async().await;
        let session = server
            .mock("GET", "/auth/get_session")
            .match_header("authorization", "Bearer good")
            .with_status(200)
            .with_body(r#"{"name": "Ada", "email": "ada@example.com"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let (verifier, _) = verifier_for(&server, TokenPair::new("good", "refresh"));
        assert!(verifier.check_authenticated().await);

        session.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_any_success_body_counts_as_authenticated() {
        let mut server = Server::new_async().await;
        let session = server
            .mock("GET", "/auth/get_session")
            .match_header("authorization", "Bearer good")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let (verifier, store) = verifier_for(&server, TokenPair::new("good", "refresh"));
        assert!(verifier.check_authenticated().await);
        assert_eq!(store.get(), TokenPair::new("good", "refresh"));

        session.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_expired_access_valid_refresh() {
        let mut server = Server::new_async().await;
        let session = server
            .mock("GET", "/auth/get_session")
            .with_status(401)
            .with_body(r#"{"detail": "Could not validate credentials"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(r#"{"access_token": "new-a", "refresh_token": "new-r"}"#)
            .expect(1)
            .create_async()
            .await;

        let (verifier, store) = verifier_for(&server, TokenPair::new("old-a", "old-r"));
        assert!(verifier.check_authenticated().await);

        session.assert_async().await;
        refresh.assert_async().await;
        assert_eq!(store.get(), TokenPair::new("new-a", "new-r"));
    }

    #[tokio::test]
    async fn test_expired_access_expired_refresh() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/auth/get_session")
            .with_status(401)
            .create_async()
            .await;
        server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .with_body(r#"{"detail": "Invalid refresh token"}"#)
            .create_async()
            .await;

        let (verifier, store) = verifier_for(&server, TokenPair::new("old-a", "old-r"));
        assert!(!verifier.check_authenticated().await);
        assert!(store.get().is_empty());
    }

    #[tokio::test]
    async fn test_only_refresh_token_goes_straight_to_refresh() {
        let mut server = Server::new_async().await;
        let session = server
            .mock("GET", "/auth/get_session")
            .expect(0)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(r#"{"access_token": "a", "refresh_token": "r"}"#)
            .create_async()
            .await;

        let tokens = TokenPair {
            access_token: None,
            refresh_token: Some("r0".to_string()),
        };
        let (verifier, _) = verifier_for(&server, tokens);
        assert!(verifier.check_authenticated().await);

        session.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_access_without_refresh_token() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/auth/get_session")
            .with_status(500)
            .create_async()
            .await;

        let tokens = TokenPair {
            access_token: Some("a".to_string()),
            refresh_token: None,
        };
        let (verifier, _) = verifier_for(&server, tokens);
        assert!(!verifier.check_authenticated().await);
    }

    #[tokio::test]
    async fn test_current_session_refreshes_and_retries() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/auth/get_session")
            .match_header("authorization", "Bearer old-a")
            .with_status(401)
            .create_async()
            .await;
        server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(r#"{"access_token": "new-a", "refresh_token": "new-r"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/auth/get_session")
            .match_header("authorization", "Bearer new-a")
            .with_status(200)
            .with_body(r#"{"name": "Ada", "email": "ada@example.com"}"#)
            .create_async()
            .await;

        let (verifier, _) = verifier_for(&server, TokenPair::new("old-a", "old-r"));
        let session = verifier.current_session().await.expect("session");
        assert_eq!(session.email, "ada@example.com");
    }
}
