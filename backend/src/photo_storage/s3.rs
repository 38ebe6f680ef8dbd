//! S3-backed photo store

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{ListingPolicy, PhotoStore, PresignedUrl, StorageError, StorageResult};

/// Photo store client for S3 operations
pub struct S3PhotoStore {
    s3_client: Arc<S3Client>,
    listing_policy: ListingPolicy,
    clock: fn() -> SystemTime,
}

impl S3PhotoStore {
    /// Creates a new photo store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `listing_policy` - Whether to stop after the first listing page
    #[must_use]
    pub fn new(s3_client: Arc<S3Client>, listing_policy: ListingPolicy) -> Self {
        Self {
            s3_client,
            listing_policy,
            clock: SystemTime::now,
        }
    }

    /// Replaces the clock used as the signing start time
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> SystemTime) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    /// Lists object keys with `ListObjectsV2`
    ///
    /// Every key is returned as listed, folder markers included. Under
    /// `ListingPolicy::FirstPage` a truncated listing is logged and the remaining
    /// keys are not returned.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::UpstreamError` for 5xx errors
    /// Returns `StorageError::ListFailed` for every other listing failure
    async fn list_keys(&self, bucket: &str) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;
        let mut pages = 0_usize;

        loop {
            let mut request = self.s3_client.list_objects_v2().bucket(bucket);
            if let Some(token) = continuation_token.take() {
                request = request.continuation_token(token);
            }

            let output = request.send().await.map_err(StorageError::from)?;
            pages += 1;

            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(ToString::to_string),
            );

            let truncated = output.is_truncated().unwrap_or(false);
            match (self.listing_policy, truncated, output.next_continuation_token()) {
                (ListingPolicy::AllPages, true, Some(token)) => {
                    continuation_token = Some(token.to_string());
                }
                (ListingPolicy::FirstPage, true, _) => {
                    warn!(
                        bucket,
                        returned = keys.len(),
                        "Bucket listing truncated, keys beyond the first page are not served"
                    );
                    break;
                }
                _ => break,
            }
        }

        debug!(bucket, pages, count = keys.len(), "Listed photo keys");
        Ok(keys)
    }

    /// Generates a presigned URL for GET operations
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConfigError` if the expiry is rejected (more than 7 days)
    /// Returns `StorageError::PresignFailed` if signing fails
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<PresignedUrl> {
        let start_time = (self.clock)();

        let presigning_config = PresigningConfig::builder()
            .start_time(start_time)
            .expires_in(expires_in)
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!("Failed to create presigning config: {e}"))
            })?;

        let presigned_request = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| StorageError::presign_failed(key, &e))?;

        let expires_at = DateTime::<Utc>::from(start_time) + expires_in;

        debug!("Generated presigned URL for object: {key} expires at: {expires_at}");

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_at,
        })
    }
}
