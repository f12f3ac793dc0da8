use super::keywords::{self, Concept};
use crate::extractors::{join_steps, Extractor};
use crate::model::{Recipe, PLACEHOLDER_IMAGE};
use crate::normalize::duration::format_amount;
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const UNTITLED: &str = "Untitled Recipe";
const MIN_LINE_LEN: usize = 3;
const MAX_LINE_LEN: usize = 299;

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-–—•*·●▪◦]+\s*|\d+[.)]\s+)").unwrap());
static STARTS_WITH_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-–—•*·●▪◦]|\d)").unwrap());
static TIME_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(hours?|hrs?|h|minutes?|mins?|m|שעות|שעה|דקות|דקה|דק)").unwrap()
});
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Ingredients,
    Instructions,
}

/// Parses pasted or transcribed recipe text using section headers, falling back
/// to line position when headers are missing.
pub struct PlainTextExtractor {
    placeholder_image: String,
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new(PLACEHOLDER_IMAGE)
    }
}

impl PlainTextExtractor {
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        PlainTextExtractor {
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Best-effort extraction. The result may lack ingredients; use
    /// [`Extractor::try_extract`] to only accept complete recipes.
    pub fn extract(&self, text: &str) -> Recipe {
        let lines = clean_lines(text);
        debug!("PlainTextExtractor: {} lines after noise filtering", lines.len());

        let title_index = pick_title(&lines);
        let name = title_index
            .map(|i| lines[i].to_string())
            .unwrap_or_else(|| UNTITLED.to_string());

        let mut recipe = Recipe::with_placeholder(self.placeholder_image.clone());
        recipe.name = name;

        let mut ingredients: Vec<String> = Vec::new();
        let mut instructions: Vec<String> = Vec::new();
        let mut consumed: HashSet<usize> = HashSet::new();
        let mut section = Section::None;

        for (index, line) in lines.iter().enumerate() {
            if Some(index) == title_index {
                continue;
            }

            if keywords::is_header(Concept::Time, line) {
                assign_time(&mut recipe, line);
                continue;
            }
            if keywords::is_header(Concept::Servings, line) {
                if let Some(m) = DIGITS_RE.find(line) {
                    recipe.servings = m.as_str().to_string();
                }
                continue;
            }
            if keywords::is_header(Concept::Ingredients, line) {
                section = Section::Ingredients;
                continue;
            }
            if keywords::is_header(Concept::Instructions, line) {
                section = Section::Instructions;
                continue;
            }

            match section {
                Section::Ingredients => {
                    if STARTS_WITH_MARKER_RE.is_match(line) || line.chars().count() > 5 {
                        ingredients.push(strip_marker(line));
                        consumed.insert(index);
                    }
                }
                Section::Instructions => {
                    if line.chars().count() > 10 {
                        instructions.push(strip_marker(line));
                        consumed.insert(index);
                    }
                }
                Section::None => {}
            }
        }

        if ingredients.is_empty() {
            debug!("PlainTextExtractor: no ingredient section, scanning leading lines");
            for (index, line) in lines.iter().enumerate().skip(1).take(14) {
                if Some(index) == title_index || keywords::is_any_header(line) {
                    continue;
                }
                let len = line.chars().count();
                if STARTS_WITH_MARKER_RE.is_match(line) || (6..=99).contains(&len) {
                    ingredients.push(strip_marker(line));
                    consumed.insert(index);
                }
            }
        }

        if instructions.is_empty() {
            debug!("PlainTextExtractor: no instruction section, scanning trailing lines");
            let start = lines.len().saturating_sub(20);
            for (index, line) in lines.iter().enumerate().skip(start) {
                if Some(index) == title_index
                    || consumed.contains(&index)
                    || keywords::is_any_header(line)
                {
                    continue;
                }
                if line.chars().count() > 20 {
                    instructions.push(strip_marker(line));
                }
            }
        }

        recipe.ingredients = ingredients
            .into_iter()
            .filter(|i| !i.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        recipe.instructions = join_steps(&instructions);
        recipe
    }
}

impl Extractor<str> for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain_text"
    }

    fn try_extract(&self, text: &str) -> Option<Recipe> {
        let recipe = self.extract(text);
        if recipe.is_complete() {
            Some(recipe)
        } else {
            debug!("PlainTextExtractor: no ingredients found");
            None
        }
    }
}

/// Trimmed, non-empty lines with noise and out-of-range lengths removed.
fn clean_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| (MIN_LINE_LEN..=MAX_LINE_LEN).contains(&line.chars().count()))
        .filter(|line| !keywords::mentions(Concept::Noise, line))
        .collect()
}

/// Index of the title among the first ten lines.
///
/// Only lines before the first section header can name the recipe, and
/// bulleted or numbered lines never do.
fn pick_title(lines: &[&str]) -> Option<usize> {
    let preamble: Vec<(usize, &str)> = lines
        .iter()
        .take(10)
        .copied()
        .enumerate()
        .take_while(|(_, line)| {
            !keywords::is_header(Concept::Ingredients, line)
                && !keywords::is_header(Concept::Instructions, line)
        })
        .filter(|(_, line)| !keywords::is_any_header(line) && !MARKER_RE.is_match(line))
        .collect();

    preamble
        .iter()
        .find(|(_, line)| {
            let len = line.chars().count();
            let titled = (6..=99).contains(&len) && !line.to_lowercase().contains("recipe");
            titled || line.split_whitespace().count() <= 10
        })
        .or(preamble.first())
        .map(|(i, _)| *i)
}

fn assign_time(recipe: &mut Recipe, line: &str) {
    let mut hours = None;
    let mut minutes = None;
    for caps in TIME_AMOUNT_RE.captures_iter(line) {
        let amount = caps[1].to_string();
        let unit = caps[2].to_lowercase();
        if unit.starts_with('h') || unit.starts_with('ש') {
            hours.get_or_insert(amount);
        } else {
            minutes.get_or_insert(amount);
        }
    }

    let formatted = match (hours, minutes) {
        (Some(h), Some(m)) => format!("{} {}", format_amount(&h, 'h'), format_amount(&m, 'm')),
        (Some(h), None) => format_amount(&h, 'h'),
        (None, Some(m)) => format_amount(&m, 'm'),
        (None, None) => return,
    };

    if keywords::mentions(Concept::PrepTime, line) {
        recipe.prep_time = formatted;
    } else if keywords::mentions(Concept::CookTime, line) || recipe.cook_time.is_empty() {
        recipe.cook_time = formatted;
    }
}

fn strip_marker(line: &str) -> String {
    MARKER_RE.replace(line, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("- 2 eggs"), "2 eggs");
        assert_eq!(strip_marker("• salt"), "salt");
        assert_eq!(strip_marker("1. Mix everything"), "Mix everything");
        assert_eq!(strip_marker("2) Bake"), "Bake");
        assert_eq!(strip_marker("2 eggs"), "2 eggs");
        assert_eq!(strip_marker("1.5 cups milk"), "1.5 cups milk");
    }

    #[test]
    fn test_clean_lines_drops_noise_and_bounds() {
        let text = "  Soup  \n\nab\nSubscribe to our newsletter\n".to_string() + &"x".repeat(300);
        assert_eq!(clean_lines(&text), vec!["Soup"]);
    }

    #[test]
    fn test_pick_title_skips_headers() {
        let lines = vec!["Serves 4", "Grandma's lemon cake", "Ingredients:", "2 eggs"];
        assert_eq!(pick_title(&lines), Some(1));
        assert_eq!(pick_title(&[]), None);
    }

    #[test]
    fn test_no_title_before_first_section() {
        let lines = vec!["Ingredients:", "- 2 eggs", "Lemon cake"];
        assert_eq!(pick_title(&lines), None);

        let lines = vec!["- 2 eggs", "1. Mix well", "Instructions:"];
        assert_eq!(pick_title(&lines), None);
    }

    #[test]
    fn test_text_opening_with_header_keeps_every_ingredient() {
        let recipe = PlainTextExtractor::default().extract(
            "Ingredients:\n- 2 eggs\n- 1 cup flour\nInstructions:\n1. Mix everything well\n2. Cook on a hot pan",
        );
        assert_eq!(recipe.name, UNTITLED);
        assert_eq!(recipe.ingredients, "2 eggs, 1 cup flour");
        assert_eq!(recipe.instructions, "Mix everything well. Cook on a hot pan");
    }

    #[test]
    fn test_assign_time() {
        let mut recipe = Recipe::default();
        assign_time(&mut recipe, "Prep time: 15 minutes");
        assign_time(&mut recipe, "Cook time: 1 hour 30 min");
        assert_eq!(recipe.prep_time, "15min");
        assert_eq!(recipe.cook_time, "1h 30min");

        let mut recipe = Recipe::default();
        assign_time(&mut recipe, "זמן הכנה: 20 דקות");
        assign_time(&mut recipe, "זמן אפייה: 2 שעות");
        assert_eq!(recipe.prep_time, "20min");
        assert_eq!(recipe.cook_time, "2h");
    }

    #[test]
    fn test_sentence_starting_with_time_stays_an_instruction() {
        let recipe = PlainTextExtractor::default().extract(
            "Butter cookies\nIngredients:\n- 200 g butter\n- 1 cup sugar\nInstructions:\n\
             Cream the butter with the sugar.\nTime to bake them for 12 minutes at 180C\n\
             Makes a great snack for the kids after school",
        );
        assert_eq!(recipe.cook_time, "");
        assert_eq!(recipe.servings, "");
        assert_eq!(
            recipe.instructions,
            "Cream the butter with the sugar. Time to bake them for 12 minutes at 180C. \
             Makes a great snack for the kids after school"
        );
    }

    #[test]
    fn test_total_time_does_not_override_cook_time() {
        let mut recipe = Recipe::default();
        assign_time(&mut recipe, "Cook time: 30 min");
        assign_time(&mut recipe, "Total time: 45 min");
        assert_eq!(recipe.cook_time, "30min");
    }
}
