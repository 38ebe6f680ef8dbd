//! `GET /getAllPhotos`: the gallery listing endpoint

use std::sync::Arc;

use axum::{Extension, Json};
use tracing::instrument;

use crate::{
    gallery::{ListingResponse, PhotoGallery},
    types::{AppError, Environment},
};

/// Lists every photo in the gallery bucket with a temporary download URL
///
/// Each URL is a presigned `GetObject` request valid for 24 hours (configurable
/// in development). The listing either succeeds for every photo or fails as a
/// whole; partial results are never returned.
///
/// # Errors
///
/// Returns a 500 `AppError` if listing the bucket or signing any URL fails. In
/// development the body is the raw store message as plain text.
#[instrument(skip(gallery, environment))]
pub async fn get_all_photos(
    Extension(gallery): Extension<Arc<PhotoGallery>>,
    Extension(environment): Extension<Environment>,
) -> Result<Json<ListingResponse>, AppError> {
    let listing = gallery.list_photos().await.map_err(|err| {
        tracing::error!(bucket = gallery.bucket_name(), "Photo listing failed: {err}");
        AppError::from_storage(&err, environment.expose_error_details())
    })?;

    tracing::info!(count = listing.message.len(), "Listed photos");

    Ok(Json(listing))
}
