use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to reach the relay or read its response
    #[error("Could not fetch the recipe page ({0}). Check the URL or enter the recipe manually.")]
    FetchError(#[from] reqwest::Error),

    /// Relay answered with a non-success status
    #[error("Could not fetch the recipe page (HTTP {0}). Check the URL or enter the recipe manually.")]
    RelayStatus(u16),

    /// Relay answered but the envelope was not the expected JSON
    #[error("Could not read the fetched page ({0}). Check the URL or enter the recipe manually.")]
    RelayEnvelope(#[from] serde_json::Error),

    /// Every strategy ran but the name or the ingredients are still missing
    #[error("Could not extract enough recipe data. Please enter the recipe manually.")]
    InsufficientData,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Why a single JSON-LD block did not yield a recipe
#[derive(Error, Debug)]
pub enum JsonLdError {
    #[error("block {index} is not valid JSON: {source}")]
    InvalidJson {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("block {0} contains no Recipe record")]
    NoRecipe(usize),

    #[error("Recipe record in block {index} has an unexpected shape: {source}")]
    InvalidRecipe {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Recipe record in block {0} has no name")]
    MissingName(usize),
}

/// Failures of the external translation call. Never escapes the cache.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation endpoint returned HTTP {0}")]
    Status(u16),

    #[error("unsupported target language: {0}")]
    UnsupportedLanguage(String),

    #[error("unexpected translation response shape")]
    MalformedResponse,
}

/// Failures of the persistent cache storage port
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
