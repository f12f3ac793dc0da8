//! Multilingual keyword tables for free-text recipes.
//!
//! Each concept maps to its surface variants per language. Adding a language means
//! adding one entry to each table; the matchers are built from this data.
//!
//! Variants listed in [`WEAK_VARIANTS`] also start ordinary sentences ("Time to
//! bake", "Makes a great snack"), so they only announce a header when a colon
//! follows or the line is short.

use regex::Regex;
use std::sync::LazyLock;

/// A section or field a line of free text can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concept {
    Ingredients,
    Instructions,
    Time,
    PrepTime,
    CookTime,
    Servings,
    Noise,
}

type Variants = &'static [(&'static str, &'static [&'static str])];

const INGREDIENTS: Variants = &[
    ("en", &["ingredients", "ingredient list", "you will need", "you'll need", "what you need"]),
    ("he", &["מצרכים", "המצרכים", "רכיבים", "הרכיבים", "חומרים", "החומרים"]),
];

const INSTRUCTIONS: Variants = &[
    (
        "en",
        &["instructions", "directions", "method", "steps", "preparation", "how to make", "procedure"],
    ),
    (
        "he",
        &["הוראות הכנה", "הוראות", "אופן ההכנה", "אופן הכנה", "דרך ההכנה", "שלבי הכנה", "ההכנה", "הכנה"],
    ),
];

const TIME: Variants = &[
    (
        "en",
        &[
            "prep time", "preparation time", "cook time", "cooking time", "baking time",
            "bake time", "total time", "ready in", "time",
        ],
    ),
    ("he", &["זמן הכנה", "זמן בישול", "זמן אפייה", "זמן אפיה", "זמן כולל", "זמן"]),
];

const PREP_TIME: Variants = &[("en", &["prep"]), ("he", &["הכנה"])];

const COOK_TIME: Variants = &[("en", &["cook", "bak"]), ("he", &["בישול", "אפייה", "אפיה"])];

const SERVINGS: Variants = &[
    ("en", &["servings", "serving", "serves", "yield", "yields", "makes", "portions"]),
    ("he", &["מספר מנות", "מנות", "כמות", "תפוקה"]),
];

const NOISE: Variants = &[
    (
        "en",
        &[
            "advertisement", "sponsored", "subscribe", "newsletter", "click here", "share", "print",
            "rating", "ratings", "review", "reviews", "comment", "comments", "jump to recipe",
            "sign up", "log in", "privacy policy",
        ],
    ),
    (
        "he",
        &[
            "פרסומת", "הירשמו", "הרשמה", "ניוזלטר", "לחצו כאן", "לחץ כאן", "שתפו", "שתף", "הדפס",
            "הדפסה", "דירוג", "ביקורות", "תגובות", "תגובה",
        ],
    ),
];

/// Variants that need a colon or a short line to count as a header.
pub const WEAK_VARIANTS: &[&str] = &["time", "makes", "זמן", "כמות"];

/// Longest line, in words, a weak variant may open without a colon.
const WEAK_HEADER_MAX_WORDS: usize = 4;

pub fn variants(concept: Concept) -> impl Iterator<Item = &'static str> {
    let table = match concept {
        Concept::Ingredients => INGREDIENTS,
        Concept::Instructions => INSTRUCTIONS,
        Concept::Time => TIME,
        Concept::PrepTime => PREP_TIME,
        Concept::CookTime => COOK_TIME,
        Concept::Servings => SERVINGS,
        Concept::Noise => NOISE,
    };
    table.iter().flat_map(|(_, words)| words.iter().copied())
}

/// Alternation of the strong or the weak variants, longest first so
/// multi-word variants win.
fn alternation(concept: Concept, weak: bool) -> String {
    let mut words: Vec<&str> = variants(concept)
        .filter(|w| WEAK_VARIANTS.contains(w) == weak)
        .collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Line starts with a variant (after any bullet or heading marker) followed by a
/// non-letter or the end of the line.
fn header_regex(concept: Concept) -> Regex {
    let pattern = format!(
        r"(?i)^[\s#*•\-–]*(?:{})(?:$|[^\p{{L}}\p{{N}}])",
        alternation(concept, false)
    );
    Regex::new(&pattern).unwrap()
}

/// Same shape for the weak variants, capturing a following colon.
fn weak_header_regex(concept: Concept) -> Regex {
    let pattern = format!(
        r"(?i)^[\s#*•\-–]*(?:{})(\s*:)?(?:$|[^\p{{L}}\p{{N}}])",
        alternation(concept, true)
    );
    Regex::new(&pattern).unwrap()
}

fn is_weak_header(regex: &Regex, line: &str) -> bool {
    regex.captures(line).is_some_and(|caps| {
        caps.get(1).is_some() || line.split_whitespace().count() <= WEAK_HEADER_MAX_WORDS
    })
}

/// Variant anywhere in the line as a whole word.
fn word_regex(concept: Concept) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(concept, false))).unwrap()
}

/// Variant anywhere in the line, also as a word prefix (`prep` in `preparation`).
fn prefix_regex(concept: Concept) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})", alternation(concept, false))).unwrap()
}

static INGREDIENTS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| header_regex(Concept::Ingredients));
static INSTRUCTIONS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| header_regex(Concept::Instructions));
static TIME_HEADER: LazyLock<Regex> = LazyLock::new(|| header_regex(Concept::Time));
static SERVINGS_HEADER: LazyLock<Regex> = LazyLock::new(|| header_regex(Concept::Servings));
static TIME_WEAK_HEADER: LazyLock<Regex> = LazyLock::new(|| weak_header_regex(Concept::Time));
static SERVINGS_WEAK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| weak_header_regex(Concept::Servings));
static PREP_WORD: LazyLock<Regex> = LazyLock::new(|| prefix_regex(Concept::PrepTime));
static COOK_WORD: LazyLock<Regex> = LazyLock::new(|| prefix_regex(Concept::CookTime));
static NOISE_WORD: LazyLock<Regex> = LazyLock::new(|| word_regex(Concept::Noise));

/// Whether `line` announces `concept` as a header.
pub fn is_header(concept: Concept, line: &str) -> bool {
    match concept {
        Concept::Ingredients => INGREDIENTS_HEADER.is_match(line),
        Concept::Instructions => INSTRUCTIONS_HEADER.is_match(line),
        Concept::Time => {
            TIME_HEADER.is_match(line) || is_weak_header(&TIME_WEAK_HEADER, line)
        }
        Concept::Servings => {
            SERVINGS_HEADER.is_match(line) || is_weak_header(&SERVINGS_WEAK_HEADER, line)
        }
        Concept::PrepTime | Concept::CookTime | Concept::Noise => false,
    }
}

/// Whether `line` mentions `concept` anywhere.
pub fn mentions(concept: Concept, line: &str) -> bool {
    match concept {
        Concept::PrepTime => PREP_WORD.is_match(line),
        Concept::CookTime => COOK_WORD.is_match(line),
        Concept::Noise => NOISE_WORD.is_match(line),
        other => is_header(other, line),
    }
}

pub fn is_any_header(line: &str) -> bool {
    [
        Concept::Ingredients,
        Concept::Instructions,
        Concept::Time,
        Concept::Servings,
    ]
    .into_iter()
    .any(|concept| is_header(concept, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_concept_has_english_and_hebrew() {
        for table in [INGREDIENTS, INSTRUCTIONS, TIME, PREP_TIME, COOK_TIME, SERVINGS, NOISE] {
            let languages: Vec<&str> = table.iter().map(|(lang, _)| *lang).collect();
            assert!(languages.contains(&"en"));
            assert!(languages.contains(&"he"));
        }
    }

    #[test]
    fn test_ingredient_headers() {
        assert!(is_header(Concept::Ingredients, "Ingredients:"));
        assert!(is_header(Concept::Ingredients, "INGREDIENTS"));
        assert!(is_header(Concept::Ingredients, "## Ingredients for the dough"));
        assert!(is_header(Concept::Ingredients, "מצרכים:"));
        assert!(!is_header(Concept::Ingredients, "Mix the ingredients well"));
    }

    #[test]
    fn test_instruction_headers() {
        assert!(is_header(Concept::Instructions, "Instructions:"));
        assert!(is_header(Concept::Instructions, "Method"));
        assert!(is_header(Concept::Instructions, "Steps"));
        assert!(is_header(Concept::Instructions, "אופן ההכנה:"));
        assert!(is_header(Concept::Instructions, "הוראות הכנה"));
        assert!(!is_header(Concept::Instructions, "Methodically fold the dough"));
    }

    #[test]
    fn test_time_headers() {
        assert!(is_header(Concept::Time, "Prep time: 15 min"));
        assert!(is_header(Concept::Time, "Cook Time: 1 hour"));
        assert!(is_header(Concept::Time, "Total time 45 minutes"));
        assert!(is_header(Concept::Time, "זמן הכנה: 20 דקות"));
        assert!(mentions(Concept::PrepTime, "Preparation time: 10 min"));
        assert!(mentions(Concept::CookTime, "זמן אפייה: 30 דקות"));
        assert!(!mentions(Concept::PrepTime, "Cook time: 30 min"));
    }

    #[test]
    fn test_servings_headers() {
        assert!(is_header(Concept::Servings, "Serves 4"));
        assert!(is_header(Concept::Servings, "Yield: 12 cookies"));
        assert!(is_header(Concept::Servings, "מנות: 6"));
        assert!(!is_header(Concept::Servings, "Servingspoon"));
    }

    #[test]
    fn test_weak_variants_need_colon_or_short_line() {
        assert!(is_header(Concept::Time, "Time: 40 minutes"));
        assert!(is_header(Concept::Time, "Time 40 min"));
        assert!(!is_header(Concept::Time, "Time to bake them for 12 minutes at 180C"));
        assert!(is_header(Concept::Servings, "Makes 12 cookies"));
        assert!(is_header(Concept::Servings, "Makes: about two dozen small cookies"));
        assert!(!is_header(Concept::Servings, "Makes a great snack for the kids after school"));
        assert!(is_header(Concept::Time, "זמן: 30 דקות"));
        assert!(!is_header(Concept::Time, "זמן לשים את העוגה בתנור לחצי שעה"));
    }

    #[test]
    fn test_noise() {
        assert!(mentions(Concept::Noise, "Subscribe now"));
        assert!(mentions(Concept::Noise, "Click here"));
        assert!(mentions(Concept::Noise, "לחצו כאן להרשמה"));
        assert!(!mentions(Concept::Noise, "2 cups flour"));
    }
}
