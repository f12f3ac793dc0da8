use log::debug;
use scraper::{Html, Selector};

/// The minimal DOM access the HTML extractors need.
///
/// Keeping the extractors behind this trait means they never touch the parser
/// directly, and tests can hand them a fake document.
pub trait DocumentQuery {
    /// Text content of every element matching `selector`, in document order.
    fn select_text(&self, selector: &str) -> Vec<String>;

    /// Value of `attr` on every matching element that carries it.
    fn select_attr(&self, selector: &str, attr: &str) -> Vec<String>;
}

impl DocumentQuery for Html {
    fn select_text(&self, selector: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(selector) else {
            debug!("Invalid selector: {}", selector);
            return Vec::new();
        };
        self.select(&selector)
            .map(|el| el.text().collect::<Vec<_>>().join(" "))
            .collect()
    }

    fn select_attr(&self, selector: &str, attr: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(selector) else {
            debug!("Invalid selector: {}", selector);
            return Vec::new();
        };
        self.select(&selector)
            .filter_map(|el| el.value().attr(attr).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_text_and_attr() {
        let html = Html::parse_document(
            r#"<html><head><meta property="og:image" content="https://example.com/a.jpg"></head>
            <body><h1>Title</h1><p>One</p><p>Two <b>bold</b></p></body></html>"#,
        );

        assert_eq!(html.select_text("h1"), vec!["Title"]);
        assert_eq!(html.select_text("p").len(), 2);
        assert!(html.select_text("p")[1].contains("bold"));
        assert_eq!(
            html.select_attr("meta[property='og:image']", "content"),
            vec!["https://example.com/a.jpg"]
        );
    }

    #[test]
    fn test_invalid_selector_yields_nothing() {
        let html = Html::parse_document("<p>x</p>");
        assert!(html.select_text("p[").is_empty());
    }

    #[test]
    fn test_script_text_is_raw_json() {
        let html = Html::parse_document(
            r#"<script type="application/ld+json">{"@type":"Recipe","name":"A &amp; B"}</script>"#,
        );
        let blocks = html.select_text("script[type='application/ld+json']");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("\"@type\":\"Recipe\""));
    }
}
