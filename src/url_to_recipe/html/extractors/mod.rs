mod heuristic;
mod json_ld;

pub use heuristic::HeuristicHtmlExtractor;
pub use json_ld::JsonLdExtractor;
