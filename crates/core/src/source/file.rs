use super::Listing;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use vtscope_api::{ApiError, ApiResult, Class, DisplayLanguage, SchemaSource, TranslationEntry};

/// Local JSON exports in the same shapes the API returns.
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    german: PathBuf,
    english: Option<PathBuf>,
    translations: Option<PathBuf>,
}

impl FileSchemaSource {
    pub fn new(german: PathBuf) -> Self {
        Self {
            german,
            english: None,
            translations: None,
        }
    }

    pub fn with_english(mut self, english: Option<PathBuf>) -> Self {
        self.english = english;
        self
    }

    pub fn with_translations(mut self, translations: Option<PathBuf>) -> Self {
        self.translations = translations;
        self
    }
}

async fn read_listing<T: DeserializeOwned>(path: &Path) -> ApiResult<Vec<T>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Unavailable(format!("{}: {}", path.display(), e)))?;
    let listing: Listing<T> = serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(listing.into_items())
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    fn origin(&self) -> String {
        format!("file://{}", self.german.display())
    }

    async fn fetch_classes(&self, language: DisplayLanguage) -> ApiResult<Vec<Class>> {
        match language {
            DisplayLanguage::De => read_listing(&self.german).await,
            DisplayLanguage::En => match &self.english {
                Some(path) => read_listing(path).await,
                None => Ok(Vec::new()),
            },
        }
    }

    async fn fetch_translations(&self) -> ApiResult<Vec<TranslationEntry>> {
        match &self.translations {
            Some(path) => read_listing(path).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_exports_and_tolerates_missing_optionals() {
        let dir = tempfile::tempdir().unwrap();
        let de = dir.path().join("de.json");
        std::fs::write(
            &de,
            r#"{"items": [{"id": 1, "name": "Projekt", "members": [{"name": "Code", "type": "String"}]}], "page": 0, "pageCount": 1}"#,
        )
        .unwrap();

        let source = FileSchemaSource::new(de);
        let classes = source.fetch_classes(DisplayLanguage::De).await.unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].members[0].type_name, "String");
        assert!(source.fetch_classes(DisplayLanguage::En).await.unwrap().is_empty());
        assert!(source.fetch_translations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn broken_export_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let de = dir.path().join("de.json");
        std::fs::write(&de, "{ not json").unwrap();

        let err = FileSchemaSource::new(de)
            .fetch_classes(DisplayLanguage::De)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Malformed { .. }));
    }

    #[tokio::test]
    async fn missing_export_is_unavailable() {
        let err = FileSchemaSource::new(PathBuf::from("/nonexistent/de.json"))
            .fetch_classes(DisplayLanguage::De)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_)));
    }
}
