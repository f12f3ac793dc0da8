use crate::error::JsonLdError;
use crate::extractors::{join_steps, Extractor};
use crate::model::{Recipe, PLACEHOLDER_IMAGE};
use crate::normalize::parse_duration;
use crate::url_to_recipe::html::DocumentQuery;
use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;
use std::sync::LazyLock;

const JSON_LD_SELECTOR: &str = "script[type='application/ld+json']";

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Reads schema.org Recipe objects embedded as JSON-LD.
pub struct JsonLdExtractor {
    placeholder_image: String,
}

impl Default for JsonLdExtractor {
    fn default() -> Self {
        Self::new(PLACEHOLDER_IMAGE)
    }
}

impl JsonLdExtractor {
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        JsonLdExtractor {
            placeholder_image: placeholder_image.into(),
        }
    }

    /// One result per JSON-LD block, in document order.
    ///
    /// The iterator is lazy: callers that stop at the first `Ok` never decode the
    /// remaining blocks.
    pub fn candidates<'a>(
        &'a self,
        document: &dyn DocumentQuery,
    ) -> impl Iterator<Item = Result<Recipe, JsonLdError>> + 'a {
        let scripts = document.select_text(JSON_LD_SELECTOR);
        debug!("JsonLdExtractor: Found {} JSON-LD script tags", scripts.len());

        scripts
            .into_iter()
            .enumerate()
            .map(move |(index, raw_json)| self.parse_block(index, &raw_json))
    }

    fn parse_block(&self, index: usize, raw_json: &str) -> Result<Recipe, JsonLdError> {
        let json_ld: Value = serde_json::from_str(raw_json.trim())
            .map_err(|source| JsonLdError::InvalidJson { index, source })?;

        let recipe_json = find_recipe(&json_ld).ok_or(JsonLdError::NoRecipe(index))?;
        debug!("JsonLdExtractor: Found recipe JSON in block {}", index);

        let recipe = JsonLdRecipe::try_from(recipe_json)
            .map_err(|source| JsonLdError::InvalidRecipe { index, source })?;

        let recipe = self.convert_to_recipe(recipe);
        if recipe.name.is_empty() {
            return Err(JsonLdError::MissingName(index));
        }
        Ok(recipe)
    }

    fn convert_to_recipe(&self, json_ld_recipe: JsonLdRecipe) -> Recipe {
        let ingredients = match json_ld_recipe.recipe_ingredient {
            Some(RecipeIngredients::Multiple(ingredients)) => ingredients
                .iter()
                .filter_map(Value::as_str)
                .map(|ing| decode_html_symbols(ing).trim().to_string())
                .filter(|ing| !ing.is_empty())
                .collect::<Vec<String>>()
                .join(", "),
            Some(RecipeIngredients::String(ingredients)) => decode_html_symbols(&ingredients),
            Some(RecipeIngredients::Other(_)) | None => String::new(),
        };

        let instructions = match json_ld_recipe.recipe_instructions {
            Some(RecipeInstructions::String(instructions)) => decode_html_symbols(&instructions),
            Some(RecipeInstructions::Multiple(steps)) => {
                let mut texts = Vec::new();
                for step in steps {
                    collect_step_texts(step, &mut texts);
                }
                join_steps(texts.iter().map(|text| decode_html_symbols(text)))
            }
            Some(RecipeInstructions::Other(_)) | None => String::new(),
        };

        let servings = match json_ld_recipe.recipe_yield {
            Some(RecipeYield::String(s)) => first_digits(&s),
            Some(RecipeYield::Number(n)) => first_digits(&n.to_string()),
            Some(RecipeYield::Array(values)) => values
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .map(|s| first_digits(&s))
                .find(|s| !s.is_empty())
                .unwrap_or_default(),
            _ => String::new(),
        };

        let image_src = match json_ld_recipe.image {
            Some(ImageType::String(url)) => Some(decode_html_symbols(&url)),
            Some(ImageType::Multiple(images)) => images.first().and_then(image_url_from_value),
            Some(ImageType::Object(image)) => image.url,
            _ => None,
        }
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| self.placeholder_image.clone());

        Recipe {
            name: json_ld_recipe
                .name
                .map(|name| decode_html_symbols(&name).trim().to_string())
                .unwrap_or_default(),
            ingredients,
            instructions,
            prep_time: json_ld_recipe
                .prep_time
                .map(|t| parse_duration(&t))
                .unwrap_or_default(),
            cook_time: json_ld_recipe
                .cook_time
                .map(|t| parse_duration(&t))
                .unwrap_or_default(),
            servings,
            image_src,
        }
    }
}

impl Extractor<dyn DocumentQuery> for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn try_extract(&self, document: &dyn DocumentQuery) -> Option<Recipe> {
        self.candidates(document).find_map(|candidate| match candidate {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                debug!("JsonLdExtractor: skipping candidate: {}", e);
                None
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<String>,
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Multiple(Vec<Value>),
    Object(ImageObject),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    String(String),
    /// Non-string entries are skipped one by one
    Multiple(Vec<Value>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<InstructionStep>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionStep {
    Text(String),
    Object(StepObject),
    Other(Value),
}

/// HowToStep or HowToSection
#[derive(Debug, Deserialize)]
struct StepObject {
    text: Option<String>,
    name: Option<String>,
    #[serde(rename = "itemListElement")]
    item_list_element: Option<Vec<InstructionStep>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(serde_json::Number),
    Array(Vec<Value>),
    Other(Value),
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

fn collect_step_texts(step: InstructionStep, texts: &mut Vec<String>) {
    match step {
        InstructionStep::Text(text) => texts.push(text),
        InstructionStep::Object(obj) => {
            if let Some(items) = obj.item_list_element {
                // HowToSection: the section name is a heading, not a step
                for item in items {
                    collect_step_texts(item, texts);
                }
            } else if let Some(text) = obj.text.filter(|t| !t.trim().is_empty()) {
                texts.push(text);
            } else if let Some(name) = obj.name {
                texts.push(name);
            }
        }
        InstructionStep::Other(_) => {}
    }
}

fn image_url_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(url) => Some(decode_html_symbols(url)),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn first_digits(text: &str) -> String {
    DIGITS_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Locate the first Recipe record at the root, in a root array, or in `@graph`.
fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        return items.iter().find_map(find_recipe);
    }
    if is_recipe_type(json_ld) {
        return Some(json_ld);
    }
    json_ld
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.iter().find(|item| is_recipe_type(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn document_with_blocks(blocks: &[&str]) -> Html {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        Html::parse_document(&format!(
            "<html><head>{scripts}</head><body><h1>Page</h1></body></html>"
        ))
    }

    #[test]
    fn test_first_digits() {
        assert_eq!(first_digits("Serves 4 to 6"), "4");
        assert_eq!(first_digits("lots"), "");
    }

    #[test]
    fn test_is_recipe_type_variants() {
        assert!(is_recipe_type(&serde_json::json!({"@type": "Recipe"})));
        assert!(is_recipe_type(&serde_json::json!({"@type": "recipe"})));
        assert!(is_recipe_type(
            &serde_json::json!({"@type": ["NewsArticle", "Recipe"]})
        ));
        assert!(!is_recipe_type(&serde_json::json!({"@type": "WebPage"})));
    }

    #[test]
    fn test_candidates_report_each_failure() {
        let doc = document_with_blocks(&[
            "{ not json",
            r#"{"@type":"WebSite","name":"Site"}"#,
            r#"{"@type":"Recipe","recipeIngredient":["1 egg"]}"#,
            r#"{"@type":"Recipe","name":"Omelette","recipeIngredient":["2 eggs"]}"#,
        ]);
        let extractor = JsonLdExtractor::default();
        let results: Vec<_> = extractor.candidates(&doc).collect();

        assert_eq!(results.len(), 4);
        assert!(matches!(results[0], Err(JsonLdError::InvalidJson { index: 0, .. })));
        assert!(matches!(results[1], Err(JsonLdError::NoRecipe(1))));
        assert!(matches!(results[2], Err(JsonLdError::MissingName(2))));
        assert_eq!(results[3].as_ref().unwrap().name, "Omelette");
    }

    #[test]
    fn test_try_extract_keeps_first_ok() {
        let doc = document_with_blocks(&[
            "{ broken",
            r#"{"@type":"Recipe","name":"First","recipeIngredient":"flour"}"#,
            r#"{"@type":"Recipe","name":"Second","recipeIngredient":"sugar"}"#,
        ]);
        let recipe = JsonLdExtractor::default().try_extract(&doc).unwrap();
        assert_eq!(recipe.name, "First");
        assert_eq!(recipe.ingredients, "flour");
    }

    #[test]
    fn test_how_to_section_steps_are_flattened() {
        let doc = document_with_blocks(&[r#"{
            "@type": "Recipe",
            "name": "Brookies",
            "recipeIngredient": ["160 g Mehl", "30 g Kakaopulver"],
            "recipeInstructions": [
                {"@type": "HowToSection", "name": "Teig", "itemListElement": [
                    {"@type": "HowToStep", "text": "Ofen vorheizen."},
                    {"@type": "HowToStep", "name": "Butter schmelzen"}
                ]},
                {"@type": "HowToStep", "text": "Backen"}
            ]
        }"#]);
        let recipe = JsonLdExtractor::default().try_extract(&doc).unwrap();
        assert_eq!(
            recipe.instructions,
            "Ofen vorheizen. Butter schmelzen. Backen"
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        let doc = document_with_blocks(&[
            r#"{"@type":"Recipe","name":"Mac &amp;amp; Cheese","recipeIngredient":["1 cup macaroni"]}"#,
        ]);
        let recipe = JsonLdExtractor::default().try_extract(&doc).unwrap();
        assert_eq!(recipe.name, "Mac & Cheese");
    }

    #[test]
    fn test_non_string_ingredients_are_skipped_individually() {
        let doc = document_with_blocks(&[r#"{
            "@type": "Recipe",
            "name": "Carrot Soup",
            "recipeIngredient": ["2 carrots", null, 3, {"@type": "HowToSupply"}, "1 onion"]
        }"#]);
        let recipe = JsonLdExtractor::default().try_extract(&doc).unwrap();
        assert_eq!(recipe.ingredients, "2 carrots, 1 onion");
    }
}
