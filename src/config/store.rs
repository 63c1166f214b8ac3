use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the access/refresh token pair lives between runs.
/// We differentiate the backends via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum StoreConfig {
    /// Tokens are kept for the lifetime of the process only.
    #[serde(rename = "memory")]
    Memory,
    /// Tokens are persisted to a JSON document on disk.
    #[serde(rename = "file")]
    File(FileStoreConfig),
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema, PartialEq, Eq)]
pub struct FileStoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File(FileStoreConfig {
            path: PathBuf::from(".learnhub/tokens.json"),
        })
    }
}
