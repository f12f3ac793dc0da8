/// Application language code -> code understood by the translation endpoint.
const LOCALE_CODES: &[(&str, &str)] = &[
    ("en", "en"),
    ("he", "iw"),
    ("iw", "iw"),
    ("ar", "ar"),
    ("ru", "ru"),
    ("uk", "uk"),
    ("fr", "fr"),
    ("es", "es"),
    ("de", "de"),
    ("it", "it"),
    ("pt", "pt"),
    ("nl", "nl"),
    ("pl", "pl"),
    ("tr", "tr"),
    ("am", "am"),
    ("hi", "hi"),
    ("ja", "ja"),
    ("ko", "ko"),
    ("zh", "zh-CN"),
];

/// Endpoint code for an application language, accepting region suffixes
/// (`en-US`, `pt_BR`).
pub fn endpoint_code(lang: &str) -> Option<&'static str> {
    let lang = lang.trim().to_lowercase();
    let base = lang.split(['-', '_']).next().unwrap_or_default();
    LOCALE_CODES
        .iter()
        .find(|(app, _)| *app == base)
        .map(|(_, code)| *code)
}

/// Source code for a request; anything unknown lets the endpoint detect it.
pub fn source_code(lang: &str) -> &'static str {
    if lang.eq_ignore_ascii_case("auto") {
        return "auto";
    }
    endpoint_code(lang).unwrap_or("auto")
}
