//! Typed error enum for the service layer.
//!
//! Unifies API, storage and domain failures so callers can classify them
//! into user-facing notices without downcasting.

use seamart_api::ApiError;
use seamart_core::CoreError;
use seamart_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Backend request failed.
    #[error("api: {0}")]
    Api(#[from] ApiError),

    /// On-device persistence failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// A domain rule rejected the operation (zero quantity, unknown entry).
    #[error("{0}")]
    Domain(#[from] CoreError),

    /// An optional collaborator (e.g. search endpoint) was not wired in.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api(e) => e.is_transient(),
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(e) => e.is_not_found(),
            Self::Domain(CoreError::NotFound(_)) => true,
            _ => false,
        }
    }
}
