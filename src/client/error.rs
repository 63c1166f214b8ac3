use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between us and the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected our credentials and no silent refresh was possible.
    #[error("not authenticated: {detail}")]
    Unauthorized { detail: String },

    /// The access token was rejected and the refresh token was rejected too.
    /// Both tokens have been cleared.
    #[error("session expired, please sign in again")]
    SessionExpired { detail: String },

    /// Any other non-2xx response. `detail` is the backend's message.
    #[error("{status}: {detail}")]
    Api { status: StatusCode, detail: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The message to show the user: the backend's `detail` when there is one.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Unauthorized { detail }
            | ClientError::SessionExpired { detail }
            | ClientError::Api { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthorized { .. } | ClientError::SessionExpired { .. } => {
                Some(StatusCode::UNAUTHORIZED)
            }
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// True when the user has to sign in again before anything else works.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized { .. } | ClientError::SessionExpired { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_prefers_backend_message() {
        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            detail: "Resource type already exists".to_string(),
        };
        assert_eq!(err.detail(), "Resource type already exists");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_session_expired_is_auth_failure() {
        let err = ClientError::SessionExpired {
            detail: "Invalid refresh token".to_string(),
        };
        assert!(err.is_auth_failure());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.to_string(), "session expired, please sign in again");
    }
}
