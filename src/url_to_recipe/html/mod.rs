pub mod document;
pub mod extractors;

pub use document::DocumentQuery;
