//! Object storage access for gallery photos
mod error;
mod s3;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use error::{StorageError, StorageResult};
pub use s3::S3PhotoStore;

/// Presigned URL with expiration information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    /// The presigned URL for GET operations
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// How much of a bucket listing is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingPolicy {
    /// A single `ListObjectsV2` page (at most 1000 keys)
    #[default]
    FirstPage,
    /// Follow continuation tokens until the listing is exhausted
    AllPages,
}

impl FromStr for ListingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first-page" => Ok(Self::FirstPage),
            "all-pages" => Ok(Self::AllPages),
            other => Err(format!("unknown listing policy: {other}")),
        }
    }
}

/// Read-only access to the photo container
///
/// Implementations must return keys in the order the store reports them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Lists the object keys in `bucket`
    async fn list_keys(&self, bucket: &str) -> StorageResult<Vec<String>>;

    /// Creates a read-only URL for one key, valid for `expires_in`
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<PresignedUrl>;
}
