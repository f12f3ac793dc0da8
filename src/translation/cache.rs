use super::client::{HttpTranslator, TranslationBackend};
use super::locale;
use super::storage::{CacheStorage, FileStorage, MemoryStorage};
use crate::config::TranslationConfig;
use crate::error::{StorageError, TranslationError};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;

/// Maximum number of persisted entries.
pub const CACHE_MAX: usize = 500;
/// Storage key holding the persisted `[[key, value], ...]` array.
pub const CACHE_STORAGE_KEY: &str = "translationCache";
/// Target language meaning "leave every string in its own language".
pub const MIXED_LANGUAGE: &str = "mixed";

const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, String>,
    /// Keys in insertion order.
    order: Vec<String>,
}

impl CacheState {
    fn insert(&mut self, key: String, value: String) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    /// Drop the oldest entries until at most `max` remain.
    fn evict_oldest(&mut self, max: usize) {
        let excess = self.order.len().saturating_sub(max);
        for key in self.order.drain(..excess) {
            self.entries.remove(&key);
        }
    }

    /// The `max` most recently added entries, oldest first.
    fn most_recent(&self, max: usize) -> Vec<(String, String)> {
        let start = self.order.len().saturating_sub(max);
        self.order[start..]
            .iter()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|value| (key.clone(), value.clone()))
            })
            .collect()
    }
}

/// Memoizes translations by `(target language, text)` and writes them back to
/// storage after a quiet period.
///
/// Cloning is cheap; clones share the same map and storage.
#[derive(Clone)]
pub struct TranslationCache {
    backend: Arc<dyn TranslationBackend>,
    storage: Arc<dyn CacheStorage>,
    state: Arc<Mutex<CacheState>>,
    generation: Arc<AtomicU64>,
    debounce: Duration,
    max_entries: usize,
}

impl TranslationCache {
    /// Create a cache and load whatever `storage` already holds.
    pub fn new(backend: Arc<dyn TranslationBackend>, storage: Arc<dyn CacheStorage>) -> Self {
        let mut state = CacheState::default();
        match load_entries(storage.as_ref()) {
            Ok(entries) => {
                debug!("Loaded {} cached translations", entries.len());
                for (key, value) in entries {
                    state.insert(key, value);
                }
            }
            Err(e) => warn!("Ignoring unreadable translation cache: {}", e),
        }

        TranslationCache {
            backend,
            storage,
            state: Arc::new(Mutex::new(state)),
            generation: Arc::new(AtomicU64::new(0)),
            debounce: DEFAULT_DEBOUNCE,
            max_entries: CACHE_MAX,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// HTTP backend plus file storage when `cache_path` is set, memory otherwise.
    pub fn from_config(
        config: &TranslationConfig,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let backend = HttpTranslator::new(&config.endpoint, &config.client, timeout)?;
        let storage: Arc<dyn CacheStorage> = match &config.cache_path {
            Some(dir) => Arc::new(FileStorage::new(dir)),
            None => Arc::new(MemoryStorage::new()),
        };

        Ok(Self::new(Arc::new(backend), storage)
            .with_debounce(config.debounce())
            .with_max_entries(config.max_entries))
    }

    /// Translate with source language detection.
    pub async fn translate(&self, text: &str, target_lang: &str) -> String {
        self.translate_text(text, target_lang, "auto").await
    }

    /// Translate `text` into `target_lang`, returning `text` unchanged on any failure.
    pub async fn translate_text(&self, text: &str, target_lang: &str, source_lang: &str) -> String {
        if text.is_empty() || target_lang == MIXED_LANGUAGE {
            return text.to_string();
        }

        let trimmed = text.trim();
        let key = cache_key(target_lang, trimmed);
        if let Some(hit) = self.get(&key) {
            return hit;
        }

        match self.request(trimmed, target_lang, source_lang).await {
            Ok(translated) => {
                self.lock().insert(key, translated.clone());
                self.schedule_persist();
                translated
            }
            Err(e) => {
                warn!(
                    "Translation to {} via {} failed: {}",
                    target_lang,
                    self.backend.backend_name(),
                    e
                );
                text.to_string()
            }
        }
    }

    async fn request(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, TranslationError> {
        let target = locale::endpoint_code(target_lang)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(target_lang.to_string()))?;
        let source = locale::source_code(source_lang);
        debug!("Translating {:?} from {} to {}", text, source, target);
        self.backend.translate(text, source, target).await
    }

    /// Cached translation for a full cache key (`"{target}:{text}"`).
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the most recent entries now and cancel any pending write.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.persist()
    }

    fn schedule_persist(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Ok(handle) = Handle::try_current() else {
            if let Err(e) = self.persist() {
                warn!("Failed to persist translation cache: {}", e);
            }
            return;
        };

        let cache = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(cache.debounce).await;
            if cache.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            match tokio::task::spawn_blocking(move || cache.persist()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Failed to persist translation cache: {}", e),
                Err(e) => warn!("Translation cache write task failed: {}", e),
            }
        });
    }

    /// Trims the in-memory map to `max_entries` and writes what remains.
    fn persist(&self) -> Result<(), StorageError> {
        let entries = {
            let mut state = self.lock();
            state.evict_oldest(self.max_entries);
            state.most_recent(self.max_entries)
        };
        let json = serde_json::to_string(&entries)?;
        self.storage.write(CACHE_STORAGE_KEY, &json)?;
        debug!("Persisted {} cached translations", entries.len());
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn cache_key(target_lang: &str, text: &str) -> String {
    format!("{target_lang}:{text}")
}

fn load_entries(storage: &dyn CacheStorage) -> Result<Vec<(String, String)>, StorageError> {
    match storage.read(CACHE_STORAGE_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
