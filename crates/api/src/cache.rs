use crate::ApiResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of one cached dataset on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub key: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Unix seconds of the fetch that produced the entry.
    pub fetched_at: u64,
    pub age_secs: u64,
    pub expired: bool,
}

/// Statistics for the dataset cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub cache_dir: PathBuf,
    pub lifetime_days: u64,
    pub datasets: Vec<DatasetSummary>,
}

/// Storage for a single logical dataset with time-based expiry.
///
/// `get` must return `None` for an entry older than the configured lifetime
/// and purge it.
pub trait SnapshotCache<T>: Send + Sync {
    fn get(&self) -> Option<T>;

    fn set(&self, value: &T) -> ApiResult<()>;

    fn clear(&self) -> ApiResult<()>;
}
