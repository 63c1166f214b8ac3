//! Shared application state.
//!
//! The explicit session context every component receives instead of reaching
//! for global token storage: configuration, the token store, the request
//! pipeline, and the session checks built on top of them.

use std::sync::Arc;

use crate::api::{AiApi, AuthApi, ResourceApi, TaxonomyApi};
use crate::auth::{RouteGuard, SessionVerifier};
use crate::client::HttpGateway;
use crate::config::ConfigV1;
use crate::models::TaxonomyKind;
use crate::store::TokenStore;

/// Application state shared by every command and screen.
///
/// Cloning is cheap; all members are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Plain client for calls that must bypass the gateway (sign-in, refresh).
    pub http: reqwest::Client,
    /// The single source of truth for the access/refresh token pair.
    pub store: Arc<dyn TokenStore>,
    /// Authenticated request pipeline with silent refresh.
    pub gateway: HttpGateway,
    pub verifier: SessionVerifier,
    pub guard: RouteGuard,
}

impl AppState {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn resources(&self) -> ResourceApi<'_> {
        ResourceApi::new(&self.gateway)
    }

    pub fn taxonomy(&self, kind: TaxonomyKind) -> TaxonomyApi<'_> {
        TaxonomyApi::new(&self.gateway, kind)
    }

    pub fn types(&self) -> TaxonomyApi<'_> {
        self.taxonomy(TaxonomyKind::Type)
    }

    pub fn platforms(&self) -> TaxonomyApi<'_> {
        self.taxonomy(TaxonomyKind::Platform)
    }

    pub fn ai(&self) -> AiApi<'_> {
        AiApi::new(&self.gateway)
    }
}

/// State wired against a mock backend with an in-memory token store.
#[cfg(test)]
pub(crate) fn test_state(server: &mockito::Server, tokens: crate::models::TokenPair) -> AppState {
    use crate::config::{ApiConfig, StoreConfig};
    use crate::store::MemoryTokenStore;

    let config = ConfigV1 {
        api: ApiConfig {
            base_url: server.url(),
            timeout_in_ms: 5000,
        },
        store: StoreConfig::Memory,
        ..Default::default()
    };
    crate::startup::build_state_with_store(
        Arc::new(config),
        Arc::new(MemoryTokenStore::with_tokens(tokens)),
    )
    .expect("test state should build")
}
