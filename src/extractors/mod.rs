//! Extraction strategies and the capability they share.

use crate::model::Recipe;

pub use crate::text::PlainTextExtractor;
pub use crate::url_to_recipe::html::extractors::{HeuristicHtmlExtractor, JsonLdExtractor};

/// One extraction strategy. Pipelines hold an ordered list of these and stop at
/// the first one that returns a recipe.
pub trait Extractor<I: ?Sized> {
    fn name(&self) -> &'static str;
    fn try_extract(&self, input: &I) -> Option<Recipe>;
}

/// Join raw steps into the single instructions string of a [`Recipe`].
///
/// Trailing periods are dropped before joining so steps never end up with `..`.
pub(crate) fn join_steps<I, S>(steps: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    steps
        .into_iter()
        .map(|s| s.as_ref().trim().trim_end_matches('.').trim_end().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(". ")
}
