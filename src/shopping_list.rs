//! Merge the ingredient lines of several recipes into one shopping list.

use crate::model::{ShoppingListEntry, StoredRecipe};
use crate::normalize::{extract_qty, normalize_key};
use icu_collator::{Collator, CollatorOptions};
use log::{debug, warn};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const MIN_LINE_LEN: usize = 2;
const MAX_LINE_LEN: usize = 150;

static JUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)https?://|www\.|\.com\b|\b(?:advertisement|sponsored|subscribe|newsletter|click here|sign up|affiliate)\b|פרסומת|לחצו כאן|לחץ כאן|הירשמו",
    )
    .unwrap()
});

/// Keys that show up in ingredient lists without being something to buy.
const NON_INGREDIENT_KEYS: &[&str] = &[
    "garnish", "optional", "water", "ice", "for", "to", "serving", "decoration", "equipment",
    "note", "notes", "tip", "tips", "מים", "לקישוט", "קישוט", "להגשה", "אופציונלי", "הערה",
];

static NON_INGREDIENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NON_INGREDIENT_KEYS.iter().copied().collect());

/// Whether a raw line is worth a shopping list entry, and under which key.
fn accept_line(line: &str) -> Option<String> {
    let len = line.chars().count();
    if !(MIN_LINE_LEN..=MAX_LINE_LEN).contains(&len) || JUNK_RE.is_match(line) {
        return None;
    }

    let key = normalize_key(line);
    if key.is_empty() || NON_INGREDIENT_SET.contains(key.as_str()) {
        return None;
    }
    Some(key)
}

/// Build the shopping list for the recipes whose ids are in `selected_ids`.
///
/// The selection is treated as a set and recipes are visited in collection order,
/// so any permutation of the same ids produces the same list. Entries are sorted
/// by key with root-locale collation.
pub fn build_shopping_list<S: AsRef<str>>(
    selected_ids: &[S],
    recipes: &[StoredRecipe],
) -> Vec<ShoppingListEntry> {
    let selected: HashSet<&str> = selected_ids.iter().map(|id| id.as_ref()).collect();
    let mut entries: HashMap<String, ShoppingListEntry> = HashMap::new();

    for recipe in recipes.iter().filter(|r| selected.contains(r.id.as_str())) {
        for raw in recipe.ingredients.lines() {
            let line = raw.trim();
            let Some(key) = accept_line(line) else {
                debug!("Skipping ingredient line: {:?}", line);
                continue;
            };
            let qty = extract_qty(line);

            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| ShoppingListEntry {
                    name: key,
                    count: 0,
                    total_qty: 0.0,
                    display: String::new(),
                });
            entry.count += 1;
            entry.total_qty += qty;
            if line.chars().count() > entry.display.chars().count() {
                entry.display = line.to_string();
            }
        }
    }

    let mut list: Vec<ShoppingListEntry> = entries.into_values().collect();
    sort_by_key_name(&mut list);
    list
}

/// Collation order, code points breaking ties between keys the collator deems equal.
fn sort_by_key_name(list: &mut [ShoppingListEntry]) {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => list.sort_by(|a, b| {
            collator
                .compare(&a.name, &b.name)
                .then_with(|| a.name.cmp(&b.name))
        }),
        Err(e) => {
            warn!("Collator unavailable, sorting by code point: {:?}", e);
            list.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoredIngredients;

    fn recipe(id: &str, lines: &[&str]) -> StoredRecipe {
        StoredRecipe {
            id: id.to_string(),
            name: format!("Recipe {id}"),
            ingredients: StoredIngredients::Lines(lines.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn test_accept_line() {
        assert_eq!(accept_line("2 eggs"), Some("eggs".to_string()));
        assert_eq!(accept_line("x"), None);
        assert_eq!(accept_line("https://example.com/buy"), None);
        assert_eq!(accept_line("Click here for more"), None);
        assert_eq!(accept_line("2 cups water"), None);
        assert_eq!(accept_line("Garnish"), None);
        assert_eq!(accept_line(&"a".repeat(151)), None);
    }

    #[test]
    fn test_unselected_recipes_are_ignored() {
        let recipes = vec![recipe("1", &["2 eggs"]), recipe("2", &["1 cup flour"])];
        let list = build_shopping_list(&["2"], &recipes);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "flour");
    }

    #[test]
    fn test_longest_line_is_display() {
        let recipes = vec![recipe("1", &["2 onions", "1 onions, finely chopped"])];
        let list = build_shopping_list(&["1"], &recipes);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].display, "1 onions, finely chopped");
        assert_eq!(list[0].count, 2);
        assert_eq!(list[0].total_qty, 3.0);
    }

    #[test]
    fn test_comma_separated_string_ingredients() {
        let recipes = vec![StoredRecipe {
            id: "1".to_string(),
            name: "Pancakes".to_string(),
            ingredients: StoredIngredients::Text("2 eggs, 1 cup flour, salt".to_string()),
        }];
        let list = build_shopping_list(&["1"], &recipes);
        let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["eggs", "flour", "salt"]);
        assert_eq!(list[2].total_qty, 1.0);
    }

    #[test]
    fn test_accented_keys_sort_alphabetically() {
        let recipes = vec![recipe("1", &["1 zucchini", "2 éclairs", "1 cup flour", "Apples"])];
        let list = build_shopping_list(&["1"], &recipes);
        let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["apples", "éclairs", "flour", "zucchini"]);
    }

    #[test]
    fn test_duplicate_ids_count_once() {
        let recipes = vec![recipe("1", &["2 eggs"])];
        let list = build_shopping_list(&["1", "1"], &recipes);
        assert_eq!(list[0].count, 1);
    }
}
