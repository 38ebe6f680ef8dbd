use std::sync::Arc;

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use gallery_backend::types::Environment;

/// S3 client pointed at LocalStack
pub async fn localstack_s3_client(environment: &Environment) -> Arc<S3Client> {
    Arc::new(S3Client::from_conf(environment.s3_client_config().await))
}

/// Create a fresh bucket holding the given objects
pub async fn create_bucket_with_objects(
    s3_client: &S3Client,
    bucket: &str,
    objects: &[(&str, &[u8])],
) -> Result<(), Box<dyn std::error::Error>> {
    s3_client.create_bucket().bucket(bucket).send().await?;

    for (key, data) in objects {
        s3_client
            .put_object()
            .bucket(bucket)
            .key(*key)
            .content_type("image/png")
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await?;
    }

    Ok(())
}

/// Download data from a presigned URL using HTTP
pub async fn download_from_url(url: &str) -> Result<reqwest::Response, reqwest::Error> {
    reqwest::Client::new().get(url).send().await
}
