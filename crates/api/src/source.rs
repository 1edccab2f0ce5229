use crate::ApiResult;
use crate::models::{Class, DisplayLanguage, TranslationEntry};
use async_trait::async_trait;

/// Where schema and translation data come from.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Stable identifier of the origin (URL or file path), used to key caches.
    fn origin(&self) -> String;

    /// All classes in one display language, across every page.
    async fn fetch_classes(&self, language: DisplayLanguage) -> ApiResult<Vec<Class>>;

    async fn fetch_translations(&self) -> ApiResult<Vec<TranslationEntry>>;
}
