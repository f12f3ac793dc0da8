use serde::{Deserialize, Serialize};

/// Image reference used when a source carries no usable picture.
pub const PLACEHOLDER_IMAGE: &str = "/images/recipe-placeholder.jpg";

/// Canonical recipe produced by every extractor, independent of source format.
///
/// All fields are always present; missing data is represented by an empty string
/// (except `image_src`, which falls back to a placeholder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    /// Raw ingredient lines joined with `", "`
    pub ingredients: String,
    /// Raw steps joined with `". "`
    pub instructions: String,
    pub prep_time: String,
    pub cook_time: String,
    /// Digits only, or empty
    pub servings: String,
    #[serde(rename = "image_src")]
    pub image_src: String,
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            name: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            servings: String::new(),
            image_src: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl Recipe {
    /// Empty recipe using a caller supplied placeholder image.
    pub fn with_placeholder(image_src: impl Into<String>) -> Self {
        Recipe {
            image_src: image_src.into(),
            ..Default::default()
        }
    }

    /// A recipe is only worth handing to the user when it has a name and ingredients.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.ingredients.trim().is_empty()
    }
}

/// One aggregated line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    /// Canonical grouping key
    pub name: String,
    pub count: u32,
    pub total_qty: f64,
    /// Longest raw ingredient line seen for this key
    pub display: String,
}

/// Ingredients as stored by the application: either already split or a
/// comma-separated string straight from extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredIngredients {
    Lines(Vec<String>),
    Text(String),
}

impl Default for StoredIngredients {
    fn default() -> Self {
        StoredIngredients::Lines(Vec::new())
    }
}

impl StoredIngredients {
    pub fn lines(&self) -> Vec<String> {
        match self {
            StoredIngredients::Lines(lines) => lines.clone(),
            StoredIngredients::Text(text) => text.split(',').map(|s| s.to_string()).collect(),
        }
    }
}

/// The subset of a persisted recipe the shopping list needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecipe {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: StoredIngredients,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recipe_uses_placeholder() {
        let recipe = Recipe::default();
        assert_eq!(recipe.image_src, PLACEHOLDER_IMAGE);
        assert!(!recipe.is_complete());
    }

    #[test]
    fn test_recipe_serializes_all_fields() {
        let recipe = Recipe {
            name: "Soup".to_string(),
            ingredients: "water, salt".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&recipe).unwrap();
        for key in [
            "name",
            "ingredients",
            "instructions",
            "prepTime",
            "cookTime",
            "servings",
            "image_src",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["prepTime"], "");
    }

    #[test]
    fn test_stored_ingredients_from_string_and_array() {
        let from_text: StoredRecipe =
            serde_json::from_str(r#"{"id":"1","ingredients":"2 eggs, 1 cup flour"}"#).unwrap();
        assert_eq!(from_text.ingredients.lines(), vec!["2 eggs", " 1 cup flour"]);

        let from_array: StoredRecipe =
            serde_json::from_str(r#"{"id":"2","ingredients":["2 eggs","salt"]}"#).unwrap();
        assert_eq!(from_array.ingredients.lines(), vec!["2 eggs", "salt"]);
    }
}
