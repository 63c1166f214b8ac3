use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: where the backend lives, where tokens are kept,
/// and how we log.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the remote learning-tracker backend.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

impl ApiConfig {
    /// Joins `path` onto the configured base URL without doubling slashes.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builds the layered figment: built-in version tag, then the YAML file,
/// then `LEARNHUB_`-prefixed environment variables (`LEARNHUB_API__BASE_URL`).
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path))
        .merge(Env::prefixed("LEARNHUB_").split("__"))
}

/// Extracts a `ConfigV1` from any figment, migrating older versions if needed.
pub fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from a YAML file (usually "./config.yaml") plus the environment.
pub fn load_config(path: &Path) -> Result<ConfigV1, figment::Error> {
    extract(figment(path))
}

/// The JSON schema for the configuration file.
pub fn schema_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(Config))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileStoreConfig;
    use std::path::PathBuf;

    const TEST_CONFIG: &str = r#"
version: "1.0.0"
api:
  base_url: "http://backend.test:9000/"
  timeout_in_ms: 2500
store:
  type: file
  path: /tmp/learnhub/tokens.json
logging:
  level: debug
  format: json
"#;

    #[test]
    fn test_extract_full_config() {
        let config = extract(Figment::new().merge(Yaml::string(TEST_CONFIG)))
            .expect("config should parse");

        assert_eq!(config.api.base_url, "http://backend.test:9000/");
        assert_eq!(config.api.timeout_in_ms, 2500);
        assert_eq!(
            config.store,
            StoreConfig::File(FileStoreConfig {
                path: PathBuf::from("/tmp/learnhub/tokens.json"),
            })
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = extract(
            Figment::new()
                .merge(Serialized::default("version", "1.0.0"))
                .merge(Yaml::string("store:\n  type: memory\n")),
        )
        .expect("config should parse");

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_in_ms, 10_000);
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let result = extract(Figment::new().merge(Yaml::string("version: \"9.9.9\"\n")));
        assert!(result.is_err());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_in_ms: 1000,
        };
        assert_eq!(api.url("/auth/signin"), "http://localhost:8000/auth/signin");
        assert_eq!(api.url("api/resources"), "http://localhost:8000/api/resources");
    }

    #[test]
    fn test_schema_lists_sections() {
        let schema = schema_json().expect("schema should serialize");
        for key in ["\"api\"", "\"store\"", "\"logging\"", "1.0.0"] {
            assert!(schema.contains(key), "schema is missing {}", key);
        }
    }
}
