//! Error types for the Product actor.
//!
//! The `Display` text of each variant is the message returned to HTTP clients.

use thiserror::Error;

/// Errors that can occur during product and review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found")]
    NotFound(String),

    /// The operation collides with existing state (duplicate name, duplicate or missing review).
    #[error("{0}")]
    Conflict(String),

    /// A required field is missing or out of range.
    #[error("{0}")]
    InvalidArgument(String),

    /// The acting user lacks the capability for this operation.
    #[error("{0}")]
    Forbidden(String),

    /// The document store failed or is unreachable.
    #[error("Store error: {0}")]
    Store(String),
}

impl ProductError {
    pub fn duplicate_name() -> Self {
        ProductError::Conflict("Product already exists".to_string())
    }

    pub fn duplicate_review() -> Self {
        ProductError::Conflict("You have already written a review for this product".to_string())
    }

    pub fn missing_review() -> Self {
        ProductError::Conflict("You have not written a review for this product".to_string())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ProductError::InvalidArgument(msg.into())
    }

    pub fn admin_only(operation: &str) -> Self {
        ProductError::Forbidden(format!("Only an administrator can {operation} a product"))
    }
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::Store(msg)
    }
}
