pub mod cache;
pub mod error;
pub mod models;
pub mod source;

// Re-export commonly used types
pub use cache::{CacheStats, DatasetSummary, SnapshotCache};
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use source::SchemaSource;
