use crate::extractors::{join_steps, Extractor};
use crate::model::{Recipe, PLACEHOLDER_IMAGE};
use crate::url_to_recipe::html::DocumentQuery;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Tried in order; the first selector that yields any usable text wins.
const INGREDIENT_SELECTORS: &[&str] = &[
    "[itemprop='recipeIngredient']",
    ".ingredients li",
    "[class*='ingredient'] li",
    "[class*='Ingredient'] li",
    "li[class*='ingredient']",
    "[id*='ingredient'] li",
    "[class*='ingredient']",
];

/// Lists first, then paragraphs, then bare containers.
const INSTRUCTION_SELECTORS: &[&str] = &[
    "[itemprop='recipeInstructions'] li",
    ".instructions li",
    "[class*='instruction'] li",
    "[class*='Instruction'] li",
    "[class*='direction'] li",
    "[class*='method'] li",
    "[class*='step'] li",
    "[id*='instruction'] li",
    "[id*='direction'] li",
    "ol li",
    "[itemprop='recipeInstructions']",
    "[class*='instruction'] p",
    "[class*='direction'] p",
    "[class*='method'] p",
    "[class*='step'] p",
    "[class*='instruction']",
    "[class*='direction']",
];

const PREP_TIME_SELECTORS: &[&str] = &["[class*='prep-time']", "[class*='prep_time']"];
const COOK_TIME_SELECTORS: &[&str] = &["[class*='cook-time']", "[class*='cook_time']"];
const SERVINGS_SELECTORS: &[&str] = &["[class*='servings']", "[class*='recipe-yield']"];

const MIN_INSTRUCTIONS_LEN: usize = 50;

static STEP_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.").unwrap());
static COOKING_VERB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:bake|cook|mix|heat|add)").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Selector and paragraph heuristics for pages without structured metadata.
///
/// Each field is filled from the first selector that produces something; matches
/// from different selectors are never merged, so an ingredient list split over two
/// markup patterns is only partially captured.
pub struct HeuristicHtmlExtractor {
    placeholder_image: String,
}

impl Default for HeuristicHtmlExtractor {
    fn default() -> Self {
        Self::new(PLACEHOLDER_IMAGE)
    }
}

impl HeuristicHtmlExtractor {
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        HeuristicHtmlExtractor {
            placeholder_image: placeholder_image.into(),
        }
    }

    pub fn extract_title(&self, document: &dyn DocumentQuery) -> String {
        document
            .select_text("h1")
            .first()
            .map(|t| clean_text(t))
            .unwrap_or_default()
    }

    pub fn extract_ingredients(&self, document: &dyn DocumentQuery) -> String {
        for selector in INGREDIENT_SELECTORS {
            let items: Vec<String> = document
                .select_text(selector)
                .iter()
                .map(|t| clean_text(t))
                .filter(|t| t.chars().count() > 2)
                .collect();

            let joined = items.join(", ");
            if !joined.is_empty() {
                debug!(
                    "Found {} ingredients using selector: {}",
                    items.len(),
                    selector
                );
                return joined;
            }
        }
        String::new()
    }

    pub fn extract_instructions(&self, document: &dyn DocumentQuery) -> String {
        let mut best = String::new();

        for selector in INSTRUCTION_SELECTORS {
            let items: Vec<String> = document
                .select_text(selector)
                .iter()
                .map(|t| clean_text(t))
                .filter(|t| t.chars().count() > 10)
                .filter(|t| !t.to_lowercase().contains("advertisement"))
                .collect();

            let joined = join_steps(&items);
            if joined.chars().count() > MIN_INSTRUCTIONS_LEN {
                debug!("Found instructions using selector: {}", selector);
                return joined;
            }
            if best.is_empty() && !joined.is_empty() {
                best = joined;
            }
        }

        let from_paragraphs = self.scan_paragraphs(document);
        if from_paragraphs.is_empty() {
            best
        } else {
            debug!("Found instructions by scanning paragraphs");
            from_paragraphs
        }
    }

    /// Last resort: every paragraph that reads like a numbered or cooking step.
    fn scan_paragraphs(&self, document: &dyn DocumentQuery) -> String {
        let steps: Vec<String> = document
            .select_text("p")
            .iter()
            .map(|t| clean_text(t))
            .filter(|t| (30..=500).contains(&t.chars().count()))
            .filter(|t| STEP_NUMBER_RE.is_match(t) || COOKING_VERB_RE.is_match(t))
            .collect();
        join_steps(&steps)
    }

    fn extract_image(&self, document: &dyn DocumentQuery) -> String {
        document
            .select_attr("meta[property='og:image']", "content")
            .into_iter()
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| self.placeholder_image.clone())
    }
}

impl Extractor<dyn DocumentQuery> for HeuristicHtmlExtractor {
    fn name(&self) -> &'static str {
        "heuristic_html"
    }

    fn try_extract(&self, document: &dyn DocumentQuery) -> Option<Recipe> {
        debug!("Attempting to extract recipe using HTML heuristics");

        let name = self.extract_title(document);
        let ingredients = self.extract_ingredients(document);

        if name.is_empty() && ingredients.is_empty() {
            debug!("HTML heuristics found neither a title nor ingredients");
            return None;
        }

        let servings = first_text(document, SERVINGS_SELECTORS)
            .and_then(|s| DIGITS_RE.find(&s).map(|m| m.as_str().to_string()))
            .unwrap_or_default();

        Some(Recipe {
            name,
            ingredients,
            instructions: self.extract_instructions(document),
            prep_time: first_text(document, PREP_TIME_SELECTORS).unwrap_or_default(),
            cook_time: first_text(document, COOK_TIME_SELECTORS).unwrap_or_default(),
            servings,
            image_src: self.extract_image(document),
        })
    }
}

fn first_text(document: &dyn DocumentQuery, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select_text(selector)
            .iter()
            .map(|t| clean_text(t))
            .find(|t| !t.is_empty())
    })
}

/// Collapse the whitespace runs left behind by nested inline elements.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
