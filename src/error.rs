//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine, registry and HTTP layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A live entry already exists for the key (put is insert-only)
    #[error("Entry already exists: {0}")]
    EntryExists(String),

    /// No provider registered under the name
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Key absent or expired (HTTP reads only; the engine returns `None`)
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// No cache registered under the name
    #[error("Cache not found: {0}")]
    CacheNotFound(String),

    /// A cache with the same name is already registered
    #[error("Cache already exists: {0}")]
    CacheAlreadyExists(String),

    /// Cache configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The background sweeper could not be started
    #[error("Sweeper unavailable: {0}")]
    SweeperUnavailable(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::EntryExists(_) | CacheError::CacheAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            CacheError::KeyNotFound(_)
            | CacheError::ProviderNotFound(_)
            | CacheError::CacheNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidConfig(_) | CacheError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::SweeperUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::EntryExists("session:42".to_string());
        assert_eq!(err.to_string(), "Entry already exists: session:42");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (CacheError::EntryExists("k".into()), StatusCode::CONFLICT),
            (CacheError::CacheAlreadyExists("c".into()), StatusCode::CONFLICT),
            (CacheError::KeyNotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::CacheNotFound("c".into()), StatusCode::NOT_FOUND),
            (CacheError::ProviderNotFound("p".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidConfig("x".into()), StatusCode::BAD_REQUEST),
            (CacheError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                CacheError::SweeperUnavailable("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
