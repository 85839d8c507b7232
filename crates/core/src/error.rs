use thiserror::Error;

/// Errors raised by domain types in seamart-core
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
