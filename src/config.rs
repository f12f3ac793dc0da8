use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::model::PLACEHOLDER_IMAGE;

/// Main ingestion configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Relay endpoint that fetches a page on our behalf and returns `{ "contents": ... }`
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Image reference used when a recipe carries none
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    /// Translation memoizer configuration
    #[serde(default)]
    pub translation: TranslationConfig,
}

/// Configuration for the translation endpoint and its cache
#[derive(Debug, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Base URL of the translation endpoint
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
    /// Value of the `client` query parameter
    #[serde(default = "default_translation_client")]
    pub client: String,
    /// Delay before the cache is written back, coalescing bursts of translations
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Maximum number of persisted cache entries
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Directory holding the persisted cache (in-memory only when unset)
    pub cache_path: Option<PathBuf>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            client: default_translation_client(),
            debounce_ms: default_debounce_ms(),
            max_entries: default_max_entries(),
            cache_path: None,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            timeout: default_timeout(),
            placeholder_image: default_placeholder_image(),
            translation: TranslationConfig::default(),
        }
    }
}

// Default value functions
fn default_relay_url() -> String {
    "https://api.allorigins.win/get".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_translation_client() -> String {
    "gtx".to_string()
}

fn default_debounce_ms() -> u64 {
    2000
}

fn default_max_entries() -> usize {
    500
}

impl IngestConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl TranslationConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_INGEST__ prefix
/// 2. recipe_ingest.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_INGEST__TRANSLATION__ENDPOINT
pub fn load_config() -> Result<IngestConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_ingest").required(false))
        // Use double underscore for nested: RECIPE_INGEST__TRANSLATION__DEBOUNCE_MS
        .add_source(
            Environment::with_prefix("RECIPE_INGEST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
