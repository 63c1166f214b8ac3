use std::fmt;

use crate::client::ClientError;

/// What a screen has to show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error { detail: String },
    Ready(T),
}

impl<T> ViewState<T> {
    /// Uses the backend's own message on failure.
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => ViewState::Error { detail: e.detail() },
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// A screen is a view state plus the words to show while it loads.
pub trait Screen {
    type Data: fmt::Display;

    fn loading_message(&self) -> &'static str;
    fn state(&self) -> &ViewState<Self::Data>;
}

/// Renders whichever of the three states the screen is in.
pub fn render<S: Screen>(screen: &S) -> String {
    match screen.state() {
        ViewState::Loading => format!("{}\n", screen.loading_message()),
        ViewState::Error { detail } => format!("Error: {}\n", detail),
        ViewState::Ready(data) => data.to_string(),
    }
}

/// A blocking message for a failed action. The screen behind it keeps
/// whatever it was showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl Alert {
    /// Backend detail when the backend answered, `fallback` otherwise.
    pub fn from_error(error: &ClientError, fallback: &str) -> Self {
        let message = match error {
            ClientError::Api { detail, .. } | ClientError::Unauthorized { detail }
                if !detail.trim().is_empty() =>
            {
                detail.clone()
            }
            ClientError::SessionExpired { .. } => error.to_string(),
            _ => fallback.to_string(),
        };
        Alert { message }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}
