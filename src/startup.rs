//! Application startup.
//!
//! Wires the token store, the shared HTTP client, the refresher, the session
//! verifier, the gateway and the route guard into one [`AppState`].

use std::sync::Arc;
use tracing::info;

use crate::auth::{RouteGuard, SessionVerifier, TokenRefresher};
use crate::client::{build_http_client, ClientError, HttpGateway};
use crate::config::ConfigV1;
use crate::state::AppState;
use crate::store::{create_store, TokenStore};

/// Builds the state with the token store named in the configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_state(config: Arc<ConfigV1>) -> Result<AppState, ClientError> {
    let store = create_store(&config.store);
    build_state_with_store(config, store)
}

/// Builds the state around an existing token store.
pub fn build_state_with_store(
    config: Arc<ConfigV1>,
    store: Arc<dyn TokenStore>,
) -> Result<AppState, ClientError> {
    let http = build_http_client(&config.api)?;
    let refresher = TokenRefresher::new(http.clone(), &config.api, store.clone());
    let verifier = SessionVerifier::new(http.clone(), &config.api, store.clone(), refresher.clone());
    let gateway = HttpGateway::new(http.clone(), &config.api, store.clone(), refresher);
    let guard = RouteGuard::new(Arc::new(verifier.clone()));

    info!(
        event_name = "startup.ready",
        event_domain = "startup",
        base_url = config.api.base_url.as_str(),
        "client initialised"
    );

    Ok(AppState {
        config,
        http,
        store,
        gateway,
        verifier,
        guard,
    })
}
