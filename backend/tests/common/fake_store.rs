use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use gallery_backend::photo_storage::{PhotoStore, PresignedUrl, StorageError, StorageResult};

/// In-memory bucket whose signer returns `https://signed/<key>`
#[derive(Default)]
pub struct FakePhotoStore {
    keys: Vec<String>,
    list_error: Option<StorageError>,
    failing_key: Option<String>,
    list_calls: AtomicUsize,
    presign_calls: AtomicUsize,
}

impl FakePhotoStore {
    pub fn with_keys(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Makes the listing call fail with the given store message
    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(StorageError::ListFailed(message.to_string()));
        self
    }

    /// Makes listing fail as if S3 answered with a 5xx
    pub fn unavailable(mut self, message: &str) -> Self {
        self.list_error = Some(StorageError::UpstreamError(message.to_string()));
        self
    }

    /// Makes signing fail for one key
    pub fn failing_sign(mut self, key: &str) -> Self {
        self.failing_key = Some(key.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn presign_calls(&self) -> usize {
        self.presign_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoStore for FakePhotoStore {
    async fn list_keys(&self, _bucket: &str) -> StorageResult<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match &self.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.keys.clone()),
        }
    }

    async fn presign_get(
        &self,
        _bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<PresignedUrl> {
        self.presign_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_key.as_deref() == Some(key) {
            return Err(StorageError::PresignFailed {
                key: key.to_string(),
                message: format!("Failed to sign {key}"),
            });
        }
        Ok(PresignedUrl {
            url: format!("https://signed/{key}"),
            expires_at: Utc::now() + expires_in,
        })
    }
}
