//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::BehaviorVersion;
use thiserror::Error;
use tracing::Level;

use crate::photo_storage::ListingPolicy;

/// Default lifetime of a presigned download URL: 24 hours
pub const DEFAULT_PRESIGNED_URL_EXPIRY_SECS: u64 = 24 * 60 * 60;

/// Errors raised while reading the process configuration at startup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or blank
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),

    /// An environment variable holds a value we cannot interpret
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Optional override for presigned URL expiry in seconds
        presign_expiry_override: Option<u64>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// When `APP_ENV` is unset the stage is `development`, except under the
    /// Lambda runtime where it is `production`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `APP_ENV` holds an unknown stage
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| {
                if Self::is_lambda() {
                    "production".to_string()
                } else {
                    "development".to_string()
                }
            })
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => {
                let presign_expiry_override = env::var("PRESIGNED_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|val| val.parse::<u64>().ok());

                Ok(Self::Development {
                    presign_expiry_override,
                })
            }
            _ => Err(ConfigError::InvalidValue {
                name: "APP_ENV",
                value: env,
            }),
        }
    }

    /// Returns the name of the bucket holding the gallery photos
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` if `IMAGES_BUCKET_NAME` is unset or blank
    pub fn images_bucket(&self) -> Result<String, ConfigError> {
        env::var("IMAGES_BUCKET_NAME")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingVar("IMAGES_BUCKET_NAME"))
    }

    /// Returns how much of the bucket listing is used per request
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PHOTO_LISTING_POLICY` is not recognised
    pub fn listing_policy(&self) -> Result<ListingPolicy, ConfigError> {
        match env::var("PHOTO_LISTING_POLICY") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PHOTO_LISTING_POLICY",
                value,
            }),
            Err(_) => Ok(ListingPolicy::default()),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }

    /// Whether 5xx responses carry the raw store error message
    #[must_use]
    pub const fn expose_error_details(&self) -> bool {
        matches!(self, Self::Development { .. })
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development { .. } => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration for the current stage
    ///
    /// Retries and timeouts are left at the SDK defaults.
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder();

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development { .. }) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Presigned URL expiry time in seconds
    #[must_use]
    pub fn presigned_url_expiry_secs(&self) -> u64 {
        match self {
            Self::Production | Self::Staging => DEFAULT_PRESIGNED_URL_EXPIRY_SECS,
            Self::Development {
                presign_expiry_override,
            } => presign_expiry_override.unwrap_or(DEFAULT_PRESIGNED_URL_EXPIRY_SECS),
        }
    }

    /// Presigned URL expiry as a `Duration`
    #[must_use]
    pub fn presigned_url_ttl(&self) -> Duration {
        Duration::from_secs(self.presigned_url_expiry_secs())
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development { .. } => Level::DEBUG,
            })
    }

    /// Whether the process was started by the AWS Lambda runtime
    #[must_use]
    pub fn is_lambda() -> bool {
        env::var("AWS_LAMBDA_RUNTIME_API").is_ok()
    }
}
