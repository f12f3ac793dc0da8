use regex::Regex;
use std::sync::LazyLock;

static SLASH_FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+)\s+)?(\d+)\s*/\s*(\d+)").unwrap());

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+(?:[.,]\d+)?)").unwrap());

/// Value of a single vulgar fraction glyph.
pub fn vulgar_fraction(c: char) -> Option<f64> {
    match c {
        '½' => Some(0.5),
        '¼' => Some(0.25),
        '¾' => Some(0.75),
        '⅓' => Some(0.33),
        '⅔' => Some(0.67),
        _ => None,
    }
}

/// Leading quantity of an ingredient line.
///
/// Lines without a leading number (`"salt to taste"`) count as `1`: the shopping
/// list counts presence, not precision.
pub fn extract_qty(line: &str) -> f64 {
    let line = line.trim_start();

    if let Some(value) = line.chars().next().and_then(vulgar_fraction) {
        return value;
    }

    if let Some(caps) = SLASH_FRACTION_RE.captures(line) {
        let whole: f64 = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0.0);
        let numerator: f64 = caps[2].parse().unwrap_or(0.0);
        let denominator: f64 = caps[3].parse().unwrap_or(0.0);
        if denominator > 0.0 {
            return whole + numerator / denominator;
        }
    }

    if let Some(caps) = NUMBER_RE.captures(line) {
        let number = caps[1].replace(',', ".");
        if let Ok(value) = number.parse::<f64>() {
            return value;
        }
    }

    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_quantity() {
        assert_eq!(extract_qty("2 cups flour"), 2.0);
    }

    #[test]
    fn test_vulgar_fraction() {
        assert_eq!(extract_qty("½ tsp salt"), 0.5);
        assert_eq!(extract_qty("¾ cup milk"), 0.75);
        assert_eq!(extract_qty("⅓ cup oil"), 0.33);
    }

    #[test]
    fn test_qualitative_line_defaults_to_one() {
        assert_eq!(extract_qty("salt to taste"), 1.0);
        assert_eq!(extract_qty(""), 1.0);
    }

    #[test]
    fn test_decimal_separators() {
        assert_eq!(extract_qty("1.5 kg potatoes"), 1.5);
        assert_eq!(extract_qty("0,5 l milk"), 0.5);
    }

    #[test]
    fn test_slash_fractions() {
        assert_eq!(extract_qty("1/2 cup sugar"), 0.5);
        assert_eq!(extract_qty("1 1/2 cups water"), 1.5);
    }

    #[test]
    fn test_hebrew_line_with_number() {
        assert_eq!(extract_qty("3 ביצים"), 3.0);
    }
}
