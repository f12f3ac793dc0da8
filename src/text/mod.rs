//! Free-text recipe extraction (pasted text or speech transcripts).

mod extractor;
pub mod keywords;

pub use extractor::PlainTextExtractor;
