use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::ClientError;
use crate::config::ApiConfig;
use crate::models::{RefreshRequest, TokenResponse};
use crate::store::TokenStore;
use crate::utils::http_helpers::read_json;

const REFRESH_PATH: &str = "/auth/refresh";

/// Exchanges the stored refresh token for a new access/refresh pair.
///
/// This is the only component that logs a user out on its own: any failed
/// exchange clears both tokens.
#[derive(Clone)]
pub struct TokenRefresher {
    client: reqwest::Client,
    api: ApiConfig,
    store: Arc<dyn TokenStore>,
}

impl TokenRefresher {
    pub fn new(client: reqwest::Client, api: &ApiConfig, store: Arc<dyn TokenStore>) -> Self {
        TokenRefresher {
            client,
            api: api.clone(),
            store,
        }
    }

    /// Returns `true` when a new pair has been stored. Without a refresh
    /// token nothing is sent and the store is left alone.
    pub async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.store.get().refresh_token else {
            debug!(
                event_name = "auth.refresh.skipped",
                event_domain = "auth",
                "no refresh token stored"
            );
            return false;
        };

        match self.exchange(&refresh_token).await {
            Ok(tokens) => {
                self.store.save(&tokens.access_token, &tokens.refresh_token);
                info!(
                    event_name = "auth.refresh.succeeded",
                    event_domain = "auth",
                    "token pair refreshed"
                );
                true
            }
            Err(e) => {
                warn!(
                    event_name = "auth.refresh.failed",
                    event_domain = "auth",
                    status = e.status().map(|s| s.as_u16()),
                    "refresh rejected, clearing tokens: {}",
                    e
                );
                self.store.clear();
                false
            }
        }
    }

    async fn exchange(&self, refresh_token: &str) -> Result<TokenResponse, ClientError> {
        let response = self
            .client
            .post(self.api.url(REFRESH_PATH))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenPair;
    use crate::store::MemoryTokenStore;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn refresher_for(server: &Server, tokens: TokenPair) -> (TokenRefresher, Arc<dyn TokenStore>) {
        let api = ApiConfig {
            base_url: server.url(),
            timeout_in_ms: 5000,
        };
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_tokens(tokens));
        (
            TokenRefresher::new(reqwest::Client::new(), &api, store.clone()),
            store,
        )
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_makes_no_call() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let tokens = TokenPair {
            access_token: Some("stale".to_string()),
            refresh_token: None,
        };
        let (refresher, store) = refresher_for(&server, tokens.clone());

        assert!(!refresher.refresh().await);
        m.assert_async().await;
        // Nothing was attempted, so nothing is cleared either.
        assert_eq!(store.get(), tokens);
    }

    #[tokio::test]
    async fn test_refresh_success_saves_new_pair() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/refresh")
            .match_body(Matcher::Json(json!({"refresh_token": "refresh-1"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "access-2", "refresh_token": "refresh-2", "token_type": "bearer"}"#)
            .create_async()
            .await;

        let (refresher, store) = refresher_for(&server, TokenPair::new("access-1", "refresh-1"));

        assert!(refresher.refresh().await);
        m.assert_async().await;
        assert_eq!(store.get(), TokenPair::new("access-2", "refresh-2"));
    }

    #[tokio::test]
    async fn test_refresh_rejected_clears_tokens() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .with_body(r#"{"detail": "Invalid refresh token"}"#)
            .create_async()
            .await;

        let (refresher, store) = refresher_for(&server, TokenPair::new("access-1", "refresh-1"));

        assert!(!refresher.refresh().await);
        m.assert_async().await;
        assert!(store.get().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_malformed_body_clears_tokens() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(r#"{"access_token": "only-half"}"#)
            .create_async()
            .await;

        let (refresher, store) = refresher_for(&server, TokenPair::new("access-1", "refresh-1"));

        assert!(!refresher.refresh().await);
        m.assert_async().await;
        assert!(store.get().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_transport_error_clears_tokens() {
        let api = ApiConfig {
            // Nothing listens on the discard port.
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_in_ms: 500,
        };
        let store: Arc<dyn TokenStore> =
            Arc::new(MemoryTokenStore::with_tokens(TokenPair::new("a", "r")));
        let refresher = TokenRefresher::new(reqwest::Client::new(), &api, store.clone());

        assert!(!refresher.refresh().await);
        assert!(store.get().is_empty());
    }
}
