//! Photo listing: lists the bucket and signs a download URL per photo

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::photo_storage::{PhotoStore, StorageError, StorageResult};

/// A photo as exposed to the gallery frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PhotoReference {
    /// Object key within the bucket
    pub filename: String,
    /// Time-limited, read-only download URL for the object
    pub url: String,
}

/// Body of a successful `GET /getAllPhotos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    /// One entry per object, in listing order
    pub message: Vec<PhotoReference>,
    /// Bucket the photos were listed from
    pub bucket_name: String,
}

/// Stateless photo listing service over a single bucket
pub struct PhotoGallery {
    store: Arc<dyn PhotoStore>,
    bucket_name: String,
    url_ttl: Duration,
}

impl PhotoGallery {
    /// Creates a gallery over `bucket_name`
    ///
    /// # Arguments
    ///
    /// * `store` - Object store adapter used to list and sign
    /// * `bucket_name` - Bucket holding the photos
    /// * `url_ttl` - Validity window of each signed URL
    #[must_use]
    pub fn new(store: Arc<dyn PhotoStore>, bucket_name: String, url_ttl: Duration) -> Self {
        Self {
            store,
            bucket_name,
            url_ttl,
        }
    }

    /// Bucket the gallery lists
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Lists every photo with a freshly signed URL
    ///
    /// Signing runs concurrently for all keys. Output order follows the store's
    /// listing order. The first failure aborts the call and drops the signing
    /// requests still in flight; no partial listing is ever returned.
    ///
    /// # Errors
    ///
    /// Returns the `StorageError` of the listing call or of the first failed signature
    #[instrument(skip(self), fields(bucket = %self.bucket_name))]
    pub async fn list_photos(&self) -> StorageResult<ListingResponse> {
        let keys = self.store.list_keys(&self.bucket_name).await?;
        debug!("Signing {} photo URLs", keys.len());

        let signing = keys.into_iter().map(|key| async move {
            let presigned = self
                .store
                .presign_get(&self.bucket_name, &key, self.url_ttl)
                .await?;
            Ok::<_, StorageError>(PhotoReference {
                filename: key,
                url: presigned.url,
            })
        });

        let message = try_join_all(signing).await?;

        Ok(ListingResponse {
            message,
            bucket_name: self.bucket_name.clone(),
        })
    }
}
