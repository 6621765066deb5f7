//! Error types for Attache.

use thiserror::Error;

use crate::api::error::{ApiError, ResolveError};
use crate::auth::error::AuthError;

/// Primary error type for callers that need a single unified type.
///
/// The per-concern enums ([`AuthError`], [`ResolveError`], [`ApiError`])
/// carry the precise taxonomy; this wrapper exists for the CLI and other
/// top-level callers.
#[derive(Debug, Error)]
pub enum AttacheError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Directory error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, AttacheError>;
