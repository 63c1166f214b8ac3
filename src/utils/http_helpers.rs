use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ClientError;

/// Formats the bearer credential for the `Authorization` header.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Pulls a human-readable message out of an error body.
///
/// The backend answers with `{"detail": "..."}` for domain errors and with
/// `{"detail": [{"msg": "...", ...}]}` for request validation errors. Anything
/// else falls back to the raw body, and an empty body to the status text.
pub fn extract_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Turns a non-2xx response into the matching `ClientError`.
pub async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(status, &body);
    if status == StatusCode::UNAUTHORIZED {
        ClientError::Unauthorized { detail }
    } else {
        ClientError::Api { status, detail }
    }
}

/// Decodes a 2xx JSON body, or converts the failure into a `ClientError`.
/// An empty 2xx body decodes as JSON `null`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
