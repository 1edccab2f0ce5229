//! Settings for schema retrieval, caching and display.
//!
//! Layering, lowest to highest precedence: built-in defaults,
//! `~/.vtscope/config.json`, `VTSCOPE_*` environment variables, and finally
//! whatever the editor passes as LSP `initializationOptions`.

use crate::error::{Result, VtscopeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vtscope_api::DisplayLanguage;

pub const DEFAULT_BASE_DIR: &str = ".vtscope";
pub const DEFAULT_CACHE_LIFETIME_DAYS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Root directory for config, cache and logs. Honors `VTSCOPE_HOME`.
pub fn base_dir() -> PathBuf {
    base_dir_from(|key| std::env::var(key).ok())
}

pub fn base_dir_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("VTSCOPE_HOME") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_BASE_DIR)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub schema_file: Option<PathBuf>,
    pub schema_file_en: Option<PathBuf>,
    pub translations_file: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub cache_lifetime_days: u64,
    pub page_size: u32,
    pub language: DisplayLanguage,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            schema_file: None,
            schema_file_en: None,
            translations_file: None,
            cache_dir: None,
            cache_lifetime_days: DEFAULT_CACHE_LIFETIME_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            language: DisplayLanguage::De,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        base_dir().join("config.json")
    }

    /// Defaults, then the user config file if present, then the environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut settings = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        settings.apply_env_from(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&text)
            .map_err(|e| VtscopeError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VTSCOPE_API_URL") {
            self.api_url = Some(url);
        }
        if let Some(token) = lookup("VTSCOPE_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(dir) = lookup("VTSCOPE_CACHE_DIR") {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(days) = lookup("VTSCOPE_CACHE_DAYS") {
            self.cache_lifetime_days = days.trim().parse().map_err(|_| {
                VtscopeError::Config(format!("VTSCOPE_CACHE_DAYS is not a number: {}", days))
            })?;
        }
        if let Some(lang) = lookup("VTSCOPE_LANGUAGE") {
            self.language = lang.parse().map_err(VtscopeError::Config)?;
        }
        Ok(())
    }

    /// Overlay the non-null keys of a JSON object, e.g. LSP initialization options.
    pub fn merge_json(&mut self, overrides: &serde_json::Value) -> Result<()> {
        let Some(patch) = overrides.as_object() else {
            return Ok(());
        };
        let mut current = serde_json::to_value(&*self)?;
        if let Some(obj) = current.as_object_mut() {
            for (key, value) in patch {
                if !value.is_null() {
                    obj.insert(key.clone(), value.clone());
                }
            }
        }
        *self = serde_json::from_value(current)
            .map_err(|e| VtscopeError::Config(format!("invalid settings override: {}", e)))?;
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_lifetime_days == 0 {
            return Err(VtscopeError::Config(
                "cacheLifetimeDays must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(VtscopeError::Config("pageSize must be at least 1".to_string()));
        }
        if let Some(api_url) = &self.api_url {
            url::Url::parse(api_url)
                .map_err(|e| VtscopeError::Config(format!("apiUrl '{}': {}", api_url, e)))?;
        }
        Ok(())
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| base_dir().join("cache"))
    }

    pub fn cache_lifetime(&self) -> Duration {
        Duration::from_secs(self.cache_lifetime_days * 24 * 60 * 60)
    }
}
