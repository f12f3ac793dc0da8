//! Memoized translation of display strings.

mod cache;
mod client;
pub mod locale;
mod storage;

pub use cache::{TranslationCache, CACHE_MAX, CACHE_STORAGE_KEY, MIXED_LANGUAGE};
pub use client::{HttpTranslator, TranslationBackend};
pub use storage::{CacheStorage, FileStorage, MemoryStorage};
