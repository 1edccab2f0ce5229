use super::{Listing, Page};
use crate::error::{Result, VtscopeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;
use vtscope_api::{ApiError, ApiResult, Class, DisplayLanguage, SchemaSource, TranslationEntry};

/// Upper bound on pages per request series, against servers that never stop.
pub const MAX_PAGES: u32 = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Paginated REST source.
///
/// `GET {base}/classes?lang=de&page=0&pageSize=200` answers
/// `{ "items": [...], "page": 0, "pageCount": 7 }`.
pub struct HttpSchemaSource {
    client: Client,
    base: Url,
    token: Option<String>,
    page_size: u32,
}

impl HttpSchemaSource {
    pub fn new(api_url: &str, token: Option<String>, page_size: u32) -> Result<Self> {
        let mut base = Url::parse(api_url)
            .map_err(|e| VtscopeError::Config(format!("apiUrl '{}': {}", api_url, e)))?;
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base,
            token,
            page_size: page_size.max(1),
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Internal(format!("bad endpoint {}: {}", path, e)))
    }

    fn classes_url(&self, language: DisplayLanguage, page: u32) -> ApiResult<Url> {
        let mut url = self.endpoint("classes")?;
        url.query_pairs_mut()
            .append_pair("lang", language.as_str())
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &self.page_size.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Malformed {
            origin: url.to_string(),
            reason: e.to_string(),
        })
    }
}

pub(crate) fn has_more(page: u32, page_count: u32) -> bool {
    page.saturating_add(1) < page_count
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    fn origin(&self) -> String {
        self.base.to_string()
    }

    async fn fetch_classes(&self, language: DisplayLanguage) -> ApiResult<Vec<Class>> {
        let mut classes = Vec::new();
        for page in 0..MAX_PAGES {
            let body: Page<Class> = self.get_json(self.classes_url(language, page)?).await?;
            tracing::debug!(
                "Fetched {} classes ({}) page {}/{}",
                body.items.len(),
                language,
                body.page + 1,
                body.page_count
            );
            classes.extend(body.items);
            if !has_more(body.page, body.page_count) {
                return Ok(classes);
            }
        }
        tracing::warn!("Stopped paging {} classes after {} pages", language, MAX_PAGES);
        Ok(classes)
    }

    async fn fetch_translations(&self) -> ApiResult<Vec<TranslationEntry>> {
        let listing: Listing<TranslationEntry> =
            self.get_json(self.endpoint("translations")?).await?;
        Ok(listing.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_stops_on_last_page() {
        assert!(has_more(0, 3));
        assert!(has_more(1, 3));
        assert!(!has_more(2, 3));
        assert!(!has_more(0, 0));
        assert!(!has_more(u32::MAX, u32::MAX));
    }

    #[test]
    fn class_url_keeps_base_path() {
        let source = HttpSchemaSource::new("https://vertec.example.com/api", None, 50).unwrap();
        let url = source.classes_url(DisplayLanguage::En, 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://vertec.example.com/api/classes?lang=en&page=2&pageSize=50"
        );
    }

    #[test]
    fn invalid_url_is_a_config_error() {
        assert!(matches!(
            HttpSchemaSource::new("nope", None, 50),
            Err(VtscopeError::Config(_))
        ));
    }
}
