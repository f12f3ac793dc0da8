use std::time::Duration;

use crate::config::IngestConfig;
use crate::pipelines;
use crate::{ImportError, Recipe};

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch the page through the relay and extract from its HTML
    Url(String),
    /// Pasted or transcribed recipe text
    Text(String),
    /// HTML that was already fetched
    Html(String),
}

/// Builder for configuring and executing recipe imports
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    config: Option<IngestConfig>,
    relay_url: Option<String>,
    timeout: Option<Duration>,
    placeholder_image: Option<String>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use recipe_ingest::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to plain text
    ///
    /// Section headers ("Ingredients:", "Instructions:", and their Hebrew
    /// equivalents) are used when present, line position otherwise.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the input source to an HTML document
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.source = Some(InputSource::Html(html.into()));
        self
    }

    /// Use this configuration instead of loading `recipe_ingest.toml` and the environment
    pub fn config(mut self, config: IngestConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the relay endpoint used for URL imports
    ///
    /// # Example
    /// ```
    /// use recipe_ingest::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .relay_url("http://localhost:8080/get");
    /// ```
    pub fn relay_url(mut self, relay_url: impl Into<String>) -> Self {
        self.relay_url = Some(relay_url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_ingest::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Image reference used when the source has none
    pub fn placeholder_image(mut self, image: impl Into<String>) -> Self {
        self.placeholder_image = Some(image.into());
        self
    }

    /// Build and execute the recipe import operation
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - The relay request fails or answers with a non-2xx status
    /// - No name or no ingredients could be extracted
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_ingest::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Recipe, ImportError> {
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .url(), .text() or .html()".to_string(),
            )
        })?;

        let config = match self.config {
            Some(config) => config,
            None => IngestConfig::load()?,
        };
        let placeholder = self
            .placeholder_image
            .unwrap_or(config.placeholder_image.clone());

        match source {
            InputSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(ImportError::BuilderError("URL cannot be empty".to_string()));
                }
                let relay_url = self.relay_url.unwrap_or(config.relay_url.clone());
                let timeout = self.timeout.unwrap_or(config.timeout());
                pipelines::url::process(
                    &url,
                    &relay_url,
                    Some(timeout),
                    Some(placeholder.as_str()),
                )
                .await
            }
            InputSource::Text(text) => {
                pipelines::text::process(&text, Some(placeholder.as_str()))
            }
            InputSource::Html(html) => pipelines::url::extract_from_html(&html, &placeholder),
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_ingest::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
