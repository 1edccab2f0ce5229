use super::{CACHE_EXTENSION, CACHE_VERSION};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use vtscope_api::{ApiResult, SnapshotCache};
use xxhash_rust::xxh3::xxh3_64;

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// On-disk record for one dataset.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub version: u32,
    /// Unix seconds of the fetch that produced `data`.
    pub fetched_at: u64,
    pub data: T,
}

/// Leading fields of a [`CacheEntry`], decoded without the payload.
#[derive(Debug, Deserialize)]
pub(crate) struct CacheHeader {
    pub version: u32,
    pub fetched_at: u64,
}

pub(crate) fn read_header(path: &Path) -> Option<CacheHeader> {
    let bytes = fs::read(path).ok()?;
    rmp_serde::from_slice::<CacheHeader>(&bytes)
        .ok()
        .filter(|h| h.version == CACHE_VERSION)
}

/// A single dataset stored as `<dir>/<key>-<xxh3(origin)>.cache`.
///
/// Keying by origin keeps datasets from different servers or export files
/// apart.
pub struct DiskCache<T> {
    path: PathBuf,
    lifetime: Duration,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DiskCache<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(dir: &Path, key: &str, origin: &str, lifetime: Duration) -> Self {
        let hash = xxh3_64(origin.as_bytes());
        Self {
            path: dir.join(format!("{}-{:016x}.{}", key, hash, CACHE_EXTENSION)),
            lifetime,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Read the entry as of `now` (unix seconds).
    ///
    /// Stale, corrupt and version-mismatched files are deleted and reported
    /// as a miss.
    pub fn get_at(&self, now: u64) -> Option<T> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        let entry = match rmp_serde::from_slice::<CacheEntry<T>>(&bytes) {
            Ok(entry) if entry.version == CACHE_VERSION => entry,
            Ok(entry) => {
                tracing::info!(
                    "Discarding cache {} with version {} (expected {})",
                    self.path.display(),
                    entry.version,
                    CACHE_VERSION
                );
                self.purge();
                return None;
            }
            Err(e) => {
                tracing::warn!("Discarding corrupt cache {}: {}", self.path.display(), e);
                self.purge();
                return None;
            }
        };

        let age = now.saturating_sub(entry.fetched_at);
        if age > self.lifetime.as_secs() {
            tracing::info!(
                "Cache {} expired ({}s old, lifetime {}s)",
                self.path.display(),
                age,
                self.lifetime.as_secs()
            );
            self.purge();
            return None;
        }

        Some(entry.data)
    }

    /// Write `value` as fetched at `now` (unix seconds).
    pub fn set_at(&self, value: &T, now: u64) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let entry = CacheEntry {
            version: CACHE_VERSION,
            fetched_at: now,
            data: value,
        };
        // Named encoding so the header can be read without the payload type.
        let bytes = rmp_serde::to_vec_named(&entry)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!("Wrote cache {}", self.path.display());
        Ok(())
    }

    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn purge(&self) {
        if let Err(e) = self.remove() {
            tracing::warn!("Failed to remove cache {}: {}", self.path.display(), e);
        }
    }
}

impl<T> SnapshotCache<T> for DiskCache<T>
where
    T: Serialize + DeserializeOwned,
{
    fn get(&self) -> Option<T> {
        self.get_at(unix_now())
    }

    fn set(&self, value: &T) -> ApiResult<()> {
        Ok(self.set_at(value, unix_now())?)
    }

    fn clear(&self) -> ApiResult<()> {
        Ok(self.remove()?)
    }
}
