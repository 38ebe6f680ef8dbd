//! Photo Gallery backend: lists gallery photos with presigned download URLs

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Photo listing service
pub mod gallery;

/// S3 access for gallery photos
pub mod photo_storage;

/// HTTP routes
pub mod routes;

/// Router assembly and runtime hosts
pub mod server;

/// Configuration and error types
pub mod types;
