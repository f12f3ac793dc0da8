use crate::error::ImportError;
use crate::extractors::Extractor;
use crate::model::{Recipe, PLACEHOLDER_IMAGE};
use crate::url_to_recipe::fetchers::RelayFetcher;
use crate::url_to_recipe::html::extractors::{HeuristicHtmlExtractor, JsonLdExtractor};
use crate::url_to_recipe::html::DocumentQuery;
use log::{debug, info};
use scraper::Html;
use std::time::Duration;

/// Strategies tried against a parsed page, in priority order.
pub type HtmlStrategies = Vec<Box<dyn Extractor<dyn DocumentQuery> + Send + Sync>>;

/// Structured metadata first, selector heuristics second.
pub fn default_strategies(placeholder_image: &str) -> HtmlStrategies {
    vec![
        Box::new(JsonLdExtractor::new(placeholder_image)),
        Box::new(HeuristicHtmlExtractor::new(placeholder_image)),
    ]
}

/// Run `strategies` in order against `document` and keep the first recipe.
///
/// A winning strategy's result must still carry a name and ingredients.
pub fn extract_from_document(
    document: &(dyn DocumentQuery + 'static),
    strategies: &[Box<dyn Extractor<dyn DocumentQuery> + Send + Sync>],
) -> Result<Recipe, ImportError> {
    for strategy in strategies {
        if let Some(recipe) = strategy.try_extract(document) {
            debug!("Strategy {} produced a recipe", strategy.name());
            if recipe.is_complete() {
                return Ok(recipe);
            }
            info!(
                "Strategy {} matched but the recipe lacks a name or ingredients",
                strategy.name()
            );
            return Err(ImportError::InsufficientData);
        }
    }
    Err(ImportError::InsufficientData)
}

/// Extract a recipe from raw HTML with the default strategies.
pub fn extract_from_html(html: &str, placeholder_image: &str) -> Result<Recipe, ImportError> {
    let document = Html::parse_document(html);
    extract_from_document(&document, &default_strategies(placeholder_image))
}

/// Process a URL to extract a recipe
///
/// This pipeline:
/// 1. Fetches the page through the relay
/// 2. Parses it into a DOM
/// 3. Tries JSON-LD, then the HTML heuristics
/// 4. Rejects results without a name or ingredients
pub async fn process(
    url: &str,
    relay_url: &str,
    timeout: Option<Duration>,
    placeholder_image: Option<&str>,
) -> Result<Recipe, ImportError> {
    let fetcher = RelayFetcher::new(relay_url, timeout)?;
    let html = fetcher.fetch(url).await?;

    let recipe = extract_from_html(&html, placeholder_image.unwrap_or(PLACEHOLDER_IMAGE))?;
    info!("Imported recipe '{}' from {}", recipe.name, url);
    Ok(recipe)
}
