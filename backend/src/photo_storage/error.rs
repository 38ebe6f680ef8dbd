//! Error types for photo storage operations

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::{get_object::GetObjectError, list_objects_v2::ListObjectsV2Error};
use thiserror::Error;

/// Result type for photo storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while listing or signing photos
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Listing the bucket failed (permissions, missing bucket, network)
    #[error("Failed to list objects: {0}")]
    ListFailed(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),

    /// Generating the presigned URL for a single key failed
    #[error("Failed to presign {key}: {message}")]
    PresignFailed {
        /// Object key that could not be signed
        key: String,
        /// Message reported by the signer
        message: String,
    },

    /// Presigning configuration was rejected
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// The message reported by the store, without our context prefix
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::ListFailed(msg) | Self::UpstreamError(msg) | Self::ConfigError(msg) => msg,
            Self::PresignFailed { message, .. } => message,
        }
    }

    pub(super) fn presign_failed(key: &str, error: &SdkError<GetObjectError>) -> Self {
        Self::PresignFailed {
            key: key.to_string(),
            message: service_message(error),
        }
    }
}

/// Prefers the service-provided message (e.g. `Access Denied`) over the SDK's debug chain
fn service_message<E, R>(error: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    error
        .message()
        .map_or_else(|| DisplayErrorContext(error).to_string(), ToString::to_string)
}

impl From<SdkError<ListObjectsV2Error>> for StorageError {
    fn from(error: SdkError<ListObjectsV2Error>) -> Self {
        let message = service_message(&error);
        match &error {
            SdkError::ServiceError(service_err) if service_err.raw().status().as_u16() >= 500 => {
                Self::UpstreamError(message)
            }
            _ => Self::ListFailed(message),
        }
    }
}
