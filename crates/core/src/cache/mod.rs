//! On-disk dataset cache with time-based expiry.
//!
//! Each logical dataset (the merged schema, the translations) is one file
//! under the cache directory. Entries older than the configured lifetime
//! are purged on read and reported as a miss.

pub mod disk;

pub use disk::{CacheEntry, DiskCache, unix_now};

use std::fs;
use std::path::Path;
use std::time::Duration;
use vtscope_api::{CacheStats, DatasetSummary};

/// Bumped whenever the cached record shapes change.
pub const CACHE_VERSION: u32 = 1;
pub const CACHE_EXTENSION: &str = "cache";

pub const SCHEMA_KEY: &str = "schema";
pub const TRANSLATIONS_KEY: &str = "translations";

/// Summarise every dataset file in `dir`.
pub fn stats(dir: &Path, lifetime: Duration) -> CacheStats {
    let now = unix_now();
    let mut datasets = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != CACHE_EXTENSION) {
                continue;
            }
            let Some(header) = disk::read_header(&path) else {
                continue;
            };
            let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|stem| stem.rsplit_once('-').map_or(stem, |(key, _)| key))
                .unwrap_or_default()
                .to_string();
            let age_secs = now.saturating_sub(header.fetched_at);

            datasets.push(DatasetSummary {
                key,
                path,
                size_bytes,
                fetched_at: header.fetched_at,
                age_secs,
                expired: age_secs > lifetime.as_secs(),
            });
        }
    }
    datasets.sort_by(|a, b| a.key.cmp(&b.key));

    CacheStats {
        cache_dir: dir.to_path_buf(),
        lifetime_days: lifetime.as_secs() / 86_400,
        datasets,
    }
}

/// Remove every dataset file in `dir`. Returns how many were removed.
pub fn clear_dir(dir: &Path) -> std::io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == CACHE_EXTENSION) {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
