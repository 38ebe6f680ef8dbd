use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use gallery_backend::{
    gallery::PhotoGallery, photo_storage::S3PhotoStore, server, types::Environment,
};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env()?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // JSON logs for staging/production (Datadog, CloudWatch), plain text for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(filter).init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(filter).init();
        }
    }

    // Missing configuration is fatal before any request is served
    let bucket_name = environment.images_bucket()?;
    let listing_policy = environment.listing_policy()?;

    tracing::info!(
        bucket = %bucket_name,
        ?listing_policy,
        ttl_secs = environment.presigned_url_expiry_secs(),
        "Configured photo gallery"
    );

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let photo_store = Arc::new(S3PhotoStore::new(s3_client, listing_policy));
    let gallery = Arc::new(PhotoGallery::new(
        photo_store,
        bucket_name,
        environment.presigned_url_ttl(),
    ));

    server::start(environment, gallery).await
}
