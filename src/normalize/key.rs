use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static LEADING_QTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s½¼¾⅓⅔.,/\-–()*•·+]+").unwrap());

static TOKEN_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,.;:()\[\]/!?]+").unwrap());

const MEASUREMENT_WORDS: &[&str] = &[
    // English
    "cup", "cups", "tablespoon", "tablespoons", "tbsp", "tbs", "teaspoon", "teaspoons", "tsp",
    "gram", "grams", "gr", "kilogram", "kilograms", "kg", "liter", "liters", "litre", "litres",
    "ml", "milliliter", "milliliters", "oz", "ounce", "ounces", "lb", "lbs", "pound", "pounds",
    "package", "packages", "pack", "packs", "can", "cans", "jar", "jars", "clove", "cloves",
    "pinch", "pinches", "dash", "slice", "slices", "piece", "pieces", "bunch", "handful",
    "large", "medium", "small", "of",
    // Hebrew
    "כוס", "כוסות", "כף", "כפות", "כפית", "כפיות", "גרם", "גרמים", "ק\"ג", "קילו", "ליטר",
    "מ\"ל", "חבילה", "חבילות", "שקית", "שקיות", "קופסה", "קופסת", "פחית", "שן", "שיני",
    "קורט", "יחידה", "יחידות", "פרוסה", "פרוסות", "צרור", "חופן",
];

static MEASUREMENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| MEASUREMENT_WORDS.iter().copied().collect());

pub fn is_measurement_word(token: &str) -> bool {
    MEASUREMENT_SET.contains(token)
}

/// Reduce an ingredient line to the key used to merge equivalent lines.
///
/// `"2 cups flour"` and `"1 cup flour, sifted"` both map to `"flour"`. This is
/// not a lemmatizer: `"eggs"` and `"egg"` stay distinct.
pub fn normalize_key(line: &str) -> String {
    let stripped = LEADING_QTY_RE.replace(line.trim(), "");
    let lowered = stripped.to_lowercase();

    let tokens: Vec<&str> = TOKEN_SPLIT_RE
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .collect();

    tokens
        .iter()
        .find(|t| !is_measurement_word(t) && t.chars().count() > 1)
        .or_else(|| tokens.first())
        .map(|t| t.to_string())
        .unwrap_or_default()
}
