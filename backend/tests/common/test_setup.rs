use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use gallery_backend::{gallery::PhotoGallery, photo_storage::PhotoStore, server, types::Environment};
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "mario-and-friends";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

pub fn development() -> Environment {
    Environment::Development {
        presign_expiry_override: None,
    }
}

/// Router wired to an arbitrary photo store
pub struct TestContext<S> {
    pub router: Router,
    pub store: Arc<S>,
    pub environment: Environment,
}

impl<S: PhotoStore + 'static> TestContext<S> {
    pub fn new(store: S, environment: Environment) -> Self {
        setup_test_env();

        let store = Arc::new(store);
        let gallery = Arc::new(PhotoGallery::new(
            store.clone(),
            TEST_BUCKET.to_string(),
            Duration::from_secs(environment.presigned_url_expiry_secs()),
        ));

        Self {
            router: server::router(environment.clone(), gallery),
            store,
            environment,
        }
    }

    pub async fn send_get_request(&self, route: &str) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_request(
        &self,
        request: Request<Body>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
