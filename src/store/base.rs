use std::sync::Arc;

use tracing::info;

use super::{file_store::FileTokenStore, memory_store::MemoryTokenStore};
use crate::config::StoreConfig;
use crate::models::TokenPair;

/// The TokenStore trait abstracts where the access/refresh pair lives.
///
/// It is the single source of truth for both tokens: callers read it again
/// for every request instead of holding on to a token. Every operation is a
/// single synchronous read or write, and `save` replaces both tokens at once.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> TokenPair;
    fn save(&self, access_token: &str, refresh_token: &str);
    fn clear(&self);
}

/// Creates a concrete store implementation based on the StoreConfig.
pub fn create_store(config: &StoreConfig) -> Arc<dyn TokenStore> {
    match config {
        StoreConfig::Memory => {
            info!("Using in-memory token store; tokens will not survive this process.");
            Arc::new(MemoryTokenStore::new())
        }
        StoreConfig::File(file_config) => {
            let store = FileTokenStore::new(&file_config.path);
            info!("Using file token store at {}", store.path().display());
            Arc::new(store)
        }
    }
}
