//! Outbound HTTP plumbing shared by every data-access call.

pub mod error;
pub mod gateway;

pub use error::ClientError;
pub use gateway::{ApiRequest, AuthoritativeRequest, HttpGateway};

use std::time::Duration;

use crate::config::ApiConfig;

/// Builds the one `reqwest::Client` the whole application shares.
pub fn build_http_client(api: &ApiConfig) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_millis(api.timeout_in_ms))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
