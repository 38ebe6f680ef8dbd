use std::sync::Arc;

use aide::openapi::{Info, OpenApi};
use axum::{http::Method, Extension, Router};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes;
use crate::{gallery::PhotoGallery, types::Environment};

/// Builds the application router with its shared dependencies attached
///
/// Cross-origin requests are allowed from any origin, for `GET` only.
pub fn router(environment: Environment, gallery: Arc<PhotoGallery>) -> Router {
    let mut openapi = OpenApi {
        info: Info {
            title: "Photo Gallery API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(gallery))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
        .layer(TraceLayer::new_for_http())
}

/// Starts the service with the given environment and dependencies
///
/// Under the AWS Lambda runtime the router handles API Gateway events;
/// otherwise it is served over HTTP on `PORT` (default 8001).
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(environment: Environment, gallery: Arc<PhotoGallery>) -> anyhow::Result<()> {
    let router = router(environment, gallery);

    if Environment::is_lambda() {
        tracing::info!("🔄 Photo Gallery API started under the Lambda runtime");
        return lambda_http::run(router)
            .await
            .map_err(|e| anyhow::anyhow!("Lambda runtime error: {e}"));
    }

    let router = router
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default());

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Photo Gallery API started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
