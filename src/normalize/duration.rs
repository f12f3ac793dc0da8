use regex::Regex;
use std::sync::LazyLock;

static ISO_DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?$").unwrap());

/// Convert an ISO 8601 duration (hours and minutes only) to a display string.
///
/// `PT1H30M` becomes `1h 30min`, `PT45M` becomes `45min`, `PT2H` becomes `2h`.
/// Anything that does not match is assumed to be human written already and is
/// returned unchanged.
pub fn parse_duration(iso: &str) -> String {
    let Some(caps) = ISO_DURATION_RE.captures(iso.trim()) else {
        return iso.to_string();
    };

    let hours = caps.get(1).map(|m| m.as_str());
    let minutes = caps.get(2).map(|m| m.as_str());

    match (hours, minutes) {
        (Some(h), Some(m)) => format!("{h}h {m}min"),
        (Some(h), None) => format!("{h}h"),
        (None, Some(m)) => format!("{m}min"),
        (None, None) => String::new(),
    }
}

/// Format a free text amount like `15` with unit marker `h`/`m` the same way
/// [`parse_duration`] does.
pub(crate) fn format_amount(amount: &str, unit: char) -> String {
    if unit == 'h' {
        format!("{amount}h")
    } else {
        format!("{amount}min")
    }
}
