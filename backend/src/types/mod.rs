mod environment;
mod error;

pub use environment::{ConfigError, Environment, DEFAULT_PRESIGNED_URL_EXPIRY_SECS};
pub use error::{ApiErrorResponse, AppError};
