use std::sync::RwLock;

use super::TokenStore;
use crate::models::TokenPair;

/// Keeps the token pair in process memory only.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<TokenPair>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds the given tokens.
    pub fn with_tokens(tokens: TokenPair) -> Self {
        MemoryTokenStore {
            tokens: RwLock::new(tokens),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> TokenPair {
        // A poisoned lock still holds a whole pair; keep serving it.
        match self.tokens.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, access_token: &str, refresh_token: &str) {
        let pair = TokenPair::new(access_token, refresh_token);
        match self.tokens.write() {
            Ok(mut guard) => *guard = pair,
            Err(poisoned) => *poisoned.into_inner() = pair,
        }
    }

    fn clear(&self) {
        match self.tokens.write() {
            Ok(mut guard) => *guard = TokenPair::default(),
            Err(poisoned) => *poisoned.into_inner() = TokenPair::default(),
        }
    }
}
