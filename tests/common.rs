use std::path::Path;

use figment::{
    providers::{Format, Yaml},
    Figment,
};
use learnhub::config::{extract, ConfigV1};
use learnhub::startup::build_state;
use learnhub::state::AppState;
use mockito::{Mock, ServerGuard};
use std::sync::Arc;

/// Config pointing at the mock server, with tokens kept in a file under `dir`.
pub fn test_config(base_url: &str, dir: &Path) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{}"
  timeout_in_ms: 3000
store:
  type: file
  path: "{}"
logging:
  level: "debug"
  format: "json"
"#,
        base_url,
        dir.join("tokens.json").display()
    );
    extract(Figment::new().merge(Yaml::string(&yaml))).expect("test config should parse")
}

pub fn build_app(config: ConfigV1) -> AppState {
    build_state(Arc::new(config)).expect("state should build")
}

pub async fn mock_session(server: &mut ServerGuard, access_token: &str) -> Mock {
    server
        .mock("GET", "/auth/get_session")
        .match_header("authorization", format!("Bearer {}", access_token).as_str())
        .with_status(200)
        .with_body(r#"{"name": "Ada Lovelace", "email": "ada@example.com"}"#)
        .create_async()
        .await
}

pub async fn mock_rejected_session(server: &mut ServerGuard, access_token: &str) -> Mock {
    server
        .mock("GET", "/auth/get_session")
        .match_header("authorization", format!("Bearer {}", access_token).as_str())
        .with_status(401)
        .with_body(r#"{"detail": "Token has expired"}"#)
        .create_async()
        .await
}
