mod docs;
mod health;
/// Photo listing route
pub mod photos;

use aide::axum::{routing::get, ApiRouter};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route("/getAllPhotos", get(photos::get_all_photos))
}
