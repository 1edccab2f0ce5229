//! Schema sources: the remote API, or local export files.

pub mod file;
pub mod http;

pub use file::FileSchemaSource;
pub use http::HttpSchemaSource;

use crate::config::Settings;
use crate::error::{Result, VtscopeError};
use serde::Deserialize;
use std::sync::Arc;
use vtscope_api::SchemaSource;

/// Either a bare JSON array or a page object carrying `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Paged(page) => page.items,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_count: u32,
}

/// Pick the source the settings point at. The API wins over files.
pub fn from_settings(settings: &Settings) -> Result<Arc<dyn SchemaSource>> {
    if let Some(api_url) = &settings.api_url {
        let source = HttpSchemaSource::new(api_url, settings.api_token.clone(), settings.page_size)?;
        tracing::info!("Using schema API at {}", api_url);
        return Ok(Arc::new(source));
    }
    if let Some(german) = &settings.schema_file {
        let source = FileSchemaSource::new(german.clone())
            .with_english(settings.schema_file_en.clone())
            .with_translations(settings.translations_file.clone());
        tracing::info!("Using schema export {}", german.display());
        return Ok(Arc::new(source));
    }
    Err(VtscopeError::NoSource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn listing_accepts_both_shapes() {
        let bare: Listing<u32> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(bare.into_items(), vec![1, 2]);
        let paged: Listing<u32> =
            serde_json::from_str(r#"{"items": [3], "page": 0, "pageCount": 1}"#).unwrap();
        assert_eq!(paged.into_items(), vec![3]);
    }

    #[test]
    fn api_url_takes_precedence() {
        let settings = Settings {
            api_url: Some("https://vertec.example.com/api".into()),
            schema_file: Some(PathBuf::from("/tmp/classes.json")),
            ..Settings::default()
        };
        let source = from_settings(&settings).unwrap();
        assert!(source.origin().starts_with("https://vertec.example.com/api"));
    }

    #[test]
    fn nothing_configured_is_an_error() {
        assert!(matches!(
            from_settings(&Settings::default()),
            Err(VtscopeError::NoSource)
        ));
    }
}
