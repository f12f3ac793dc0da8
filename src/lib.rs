pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod model;
pub mod normalize;
pub mod pipelines;
pub mod shopping_list;
pub mod text;
pub mod translation;
pub mod url_to_recipe;

pub use builder::{InputSource, RecipeImporter, RecipeImporterBuilder};
pub use config::{IngestConfig, TranslationConfig};
pub use error::{ImportError, JsonLdError, StorageError, TranslationError};
pub use model::{Recipe, ShoppingListEntry, StoredIngredients, StoredRecipe, PLACEHOLDER_IMAGE};
pub use normalize::{extract_qty, normalize_key, parse_duration};
pub use shopping_list::build_shopping_list;
pub use translation::{
    CacheStorage, FileStorage, HttpTranslator, MemoryStorage, TranslationBackend,
    TranslationCache,
};

/// Import a recipe from a URL through the configured relay.
///
/// Configuration comes from `recipe_ingest.toml` and `RECIPE_INGEST__*`
/// environment variables, falling back to defaults.
///
/// # Arguments
/// * `url` - The recipe page to import
///
/// # Returns
/// A recipe with at least a name and ingredients
///
/// # Example
/// ```no_run
/// use recipe_ingest::url_to_recipe;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = url_to_recipe("https://example.com/recipe").await?;
/// println!("{}", recipe.ingredients);
/// # Ok(())
/// # }
/// ```
pub async fn url_to_recipe(url: &str) -> Result<Recipe, ImportError> {
    RecipeImporter::builder().url(url).build().await
}

/// Extract a recipe from pasted or transcribed text.
///
/// # Example
/// ```
/// use recipe_ingest::text_to_recipe;
///
/// let recipe = text_to_recipe("Pancakes\nIngredients:\n- 2 eggs\n- 1 cup flour").unwrap();
/// assert_eq!(recipe.name, "Pancakes");
/// assert_eq!(recipe.ingredients, "2 eggs, 1 cup flour");
/// ```
pub fn text_to_recipe(text: &str) -> Result<Recipe, ImportError> {
    pipelines::text::process(text, None)
}

/// Extract a recipe from HTML that was fetched some other way.
pub fn html_to_recipe(html: &str) -> Result<Recipe, ImportError> {
    pipelines::url::extract_from_html(html, PLACEHOLDER_IMAGE)
}
