//! Schema store with snapshot swap.
//!
//! - Readers get the current snapshot as a cheap `Arc` clone
//! - A refresh builds a new [`SchemaModel`] off to the side and swaps it in
//! - Disk IO runs on the blocking pool

use crate::cache::{self, DiskCache, SCHEMA_KEY, TRANSLATIONS_KEY};
use crate::config::Settings;
use crate::error::{Result, VtscopeError};
use crate::schema::{SchemaModel, merge_languages};
use crate::source;
use crate::translation::TranslationTable;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use vtscope_api::{
    CacheStats, Class, DisplayLanguage, SchemaSource, SnapshotCache, Translation,
    TranslationEntry,
};

pub struct SchemaEngine {
    source: Arc<dyn SchemaSource>,
    schema_cache: Arc<DiskCache<Vec<Class>>>,
    translation_cache: Arc<DiskCache<Vec<TranslationEntry>>>,

    /// `None` until the first successful load; an empty model is a valid load.
    current: Arc<RwLock<Option<Arc<SchemaModel>>>>,
    entries: RwLock<Option<Arc<Vec<TranslationEntry>>>>,
    translations: RwLock<Arc<TranslationTable>>,

    /// Serialises refreshes so concurrent callers share one fetch.
    refresh: Mutex<()>,
    cache_dir: PathBuf,
    lifetime: Duration,
}

impl SchemaEngine {
    pub fn new(source: Arc<dyn SchemaSource>, cache_dir: PathBuf, lifetime: Duration) -> Self {
        let origin = source.origin();
        Self {
            schema_cache: Arc::new(DiskCache::new(&cache_dir, SCHEMA_KEY, &origin, lifetime)),
            translation_cache: Arc::new(DiskCache::new(
                &cache_dir,
                TRANSLATIONS_KEY,
                &origin,
                lifetime,
            )),
            source,
            current: Arc::new(RwLock::new(None)),
            entries: RwLock::new(None),
            translations: RwLock::new(Arc::new(TranslationTable::default())),
            refresh: Mutex::new(()),
            cache_dir,
            lifetime,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let source = source::from_settings(settings)?;
        Ok(Self::new(
            source,
            settings.cache_dir(),
            settings.cache_lifetime(),
        ))
    }

    pub fn origin(&self) -> String {
        self.source.origin()
    }

    /// The current schema, if one was ever loaded.
    pub async fn snapshot(&self) -> Option<Arc<SchemaModel>> {
        self.current.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Load the schema.
    ///
    /// Without `force_refresh` this returns the loaded snapshot, or else a
    /// fresh-enough cache entry, before going to the source. Repeated calls
    /// return the same snapshot.
    pub async fn fetch_schema(&self, force_refresh: bool) -> Result<Arc<SchemaModel>> {
        let _guard = self.refresh.lock().await;

        if !force_refresh {
            if let Some(model) = self.snapshot().await {
                return Ok(model);
            }
            let cache = Arc::clone(&self.schema_cache);
            let cached = tokio::task::spawn_blocking(move || cache.get())
                .await
                .map_err(|e| VtscopeError::Internal(e.to_string()))?;
            if let Some(classes) = cached {
                tracing::info!("Loaded {} classes from cache", classes.len());
                return self.install(classes).await;
            }
        }

        let classes = self.fetch_merged().await?;

        let cache = Arc::clone(&self.schema_cache);
        let to_store = classes.clone();
        let stored = tokio::task::spawn_blocking(move || cache.set(&to_store))
            .await
            .map_err(|e| VtscopeError::Internal(e.to_string()))?;
        if let Err(e) = stored {
            tracing::warn!("Failed to write schema cache: {}", e);
        }

        self.install(classes).await
    }

    async fn fetch_merged(&self) -> Result<Vec<Class>> {
        let german = self.source.fetch_classes(DisplayLanguage::De).await?;
        let english = match self.source.fetch_classes(DisplayLanguage::En).await {
            Ok(classes) => classes,
            Err(e) => {
                tracing::warn!("English schema unavailable, continuing without: {}", e);
                Vec::new()
            }
        };
        tracing::info!(
            "Fetched {} German and {} English classes from {}",
            german.len(),
            english.len(),
            self.source.origin()
        );
        Ok(merge_languages(german, english))
    }

    async fn install(&self, classes: Vec<Class>) -> Result<Arc<SchemaModel>> {
        let model = tokio::task::spawn_blocking(move || Arc::new(SchemaModel::new(classes)))
            .await
            .map_err(|e| VtscopeError::Internal(e.to_string()))?;
        {
            let mut lock = self.current.write().await;
            *lock = Some(Arc::clone(&model));
        }
        self.rebuild_translations().await;
        Ok(model)
    }

    /// Load the translations file, same lookup order as [`Self::fetch_schema`].
    pub async fn fetch_translations(&self, force_refresh: bool) -> Result<Arc<TranslationTable>> {
        let _guard = self.refresh.lock().await;

        if !force_refresh {
            if self.entries.read().await.is_some() {
                return Ok(self.translation_table().await);
            }
            let cache = Arc::clone(&self.translation_cache);
            let cached = tokio::task::spawn_blocking(move || cache.get())
                .await
                .map_err(|e| VtscopeError::Internal(e.to_string()))?;
            if let Some(entries) = cached {
                tracing::info!("Loaded {} translations from cache", entries.len());
                *self.entries.write().await = Some(Arc::new(entries));
                return Ok(self.rebuild_translations().await);
            }
        }

        let entries = self.source.fetch_translations().await?;
        let cache = Arc::clone(&self.translation_cache);
        let to_store = entries.clone();
        let stored = tokio::task::spawn_blocking(move || cache.set(&to_store))
            .await
            .map_err(|e| VtscopeError::Internal(e.to_string()))?;
        if let Err(e) = stored {
            tracing::warn!("Failed to write translations cache: {}", e);
        }

        *self.entries.write().await = Some(Arc::new(entries));
        Ok(self.rebuild_translations().await)
    }

    async fn rebuild_translations(&self) -> Arc<TranslationTable> {
        let entries = self
            .entries
            .read()
            .await
            .as_ref()
            .map(|e| (**e).clone())
            .unwrap_or_default();
        let mut table = TranslationTable::new(entries);
        if let Some(model) = self.snapshot().await {
            table = table.with_schema(&model);
        }
        let table = Arc::new(table);
        *self.translations.write().await = Arc::clone(&table);
        table
    }

    pub async fn translation_table(&self) -> Arc<TranslationTable> {
        Arc::clone(&*self.translations.read().await)
    }

    pub async fn translate(&self, word: &str) -> Option<Translation> {
        self.translations.read().await.translate(word)
    }

    /// Remove both datasets of this origin from disk. The loaded snapshot
    /// stays in memory until the next refresh.
    pub async fn clear_cache(&self) -> Result<()> {
        let schema = Arc::clone(&self.schema_cache);
        let translations = Arc::clone(&self.translation_cache);
        tokio::task::spawn_blocking(move || -> Result<()> {
            schema.remove()?;
            translations.remove()?;
            Ok(())
        })
        .await
        .map_err(|e| VtscopeError::Internal(e.to_string()))??;
        tracing::info!("Cleared schema cache in {}", self.cache_dir.display());
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        cache::stats(&self.cache_dir, self.lifetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vtscope_api::{ApiError, ApiResult, TranslationKind};

    struct MockSource {
        german: Vec<Class>,
        english: Option<Vec<Class>>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn new(german: Vec<Class>) -> Self {
            Self {
                german,
                english: Some(vec![Class::new(1, "Project")]),
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }
    }

    #[async_trait]
    impl SchemaSource for MockSource {
        fn origin(&self) -> String {
            "mock://vertec".to_string()
        }

        async fn fetch_classes(&self, language: DisplayLanguage) -> ApiResult<Vec<Class>> {
            if self.fail {
                return Err(ApiError::Unavailable("connection refused".into()));
            }
            match language {
                DisplayLanguage::De => {
                    self.calls.fetch_add(1, Ordering::SeqCst);
                    Ok(self.german.clone())
                }
                DisplayLanguage::En => self
                    .english
                    .clone()
                    .ok_or_else(|| ApiError::Unavailable("no english".into())),
            }
        }

        async fn fetch_translations(&self) -> ApiResult<Vec<TranslationEntry>> {
            if self.fail {
                return Err(ApiError::Unavailable("connection refused".into()));
            }
            Ok(vec![TranslationEntry::new(
                "Leistung",
                "Service",
                TranslationKind::Class,
            )])
        }
    }

    fn engine(source: Arc<MockSource>, dir: &std::path::Path) -> SchemaEngine {
        SchemaEngine::new(source, dir.to_path_buf(), Duration::from_secs(86_400))
    }

    #[tokio::test]
    async fn fetch_is_idempotent_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::new(vec![Class::new(1, "Projekt")]));
        let engine = engine(Arc::clone(&source), dir.path());

        assert!(engine.snapshot().await.is_none());
        let first = engine.fetch_schema(false).await.unwrap();
        let second = engine.fetch_schema(false).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            first.class_by_id(1).unwrap().alt_name.as_deref(),
            Some("Project")
        );
    }

    #[tokio::test]
    async fn force_refresh_swaps_in_new_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::new(vec![Class::new(1, "Projekt")]));
        let engine = engine(Arc::clone(&source), dir.path());

        let first = engine.fetch_schema(false).await.unwrap();
        let second = engine.fetch_schema(true).await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cache_serves_a_new_engine_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::new(vec![Class::new(1, "Projekt")]));
        engine(source, dir.path()).fetch_schema(false).await.unwrap();

        let offline = engine(Arc::new(MockSource::failing()), dir.path());
        // Same origin string, so the failing source finds the cached dataset.
        let model = offline.fetch_schema(false).await.unwrap();
        assert_eq!(model.len(), 1);
        assert!(offline.fetch_schema(true).await.is_err());
        assert!(offline.snapshot().await.is_some());
    }

    #[tokio::test]
    async fn empty_schema_is_a_valid_load() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(Arc::new(MockSource::new(Vec::new())), dir.path());

        let model = engine.fetch_schema(false).await.unwrap();
        assert!(model.is_empty());
        assert!(engine.is_loaded().await);
    }

    #[tokio::test]
    async fn fetch_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(Arc::new(MockSource::failing()), dir.path());

        let err = engine.fetch_schema(false).await.unwrap_err();
        assert!(matches!(err, VtscopeError::Fetch(_)));
        assert!(engine.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn missing_english_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource {
            english: None,
            ..MockSource::new(vec![Class::new(1, "Projekt")])
        };
        let engine = engine(Arc::new(source), dir.path());

        let model = engine.fetch_schema(false).await.unwrap();
        assert_eq!(model.class_by_id(1).unwrap().alt_name, None);
    }

    #[tokio::test]
    async fn translations_combine_file_and_schema_names() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(
            Arc::new(MockSource::new(vec![Class::new(1, "Projekt")])),
            dir.path(),
        );

        engine.fetch_translations(false).await.unwrap();
        assert_eq!(engine.translate("service").await.unwrap().target, "Leistung");
        assert!(engine.translate("Project").await.is_none());

        engine.fetch_schema(false).await.unwrap();
        assert_eq!(engine.translate("Project").await.unwrap().target, "Projekt");
    }

    #[tokio::test]
    async fn clear_cache_forces_next_engine_to_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::new(vec![Class::new(1, "Projekt")]));
        let first = engine(Arc::clone(&source), dir.path());
        first.fetch_schema(false).await.unwrap();
        assert_eq!(first.stats().datasets.len(), 1);

        first.clear_cache().await.unwrap();
        assert!(first.stats().datasets.is_empty());
        assert!(first.snapshot().await.is_some());

        let second = engine(Arc::clone(&source), dir.path());
        second.fetch_schema(false).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
