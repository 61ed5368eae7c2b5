//! Error types for the contacts service.

use crate::domain::ContactId;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Contact not found: {0}")]
    ContactNotFound(ContactId),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Errors from the external avatar host.
#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Upstream host error: {0}")]
    Upstream(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream error: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(DomainError::ValidationError(msg)) => AppError::BadRequest(msg),
            RepoError::Domain(DomainError::ContactNotFound(id)) => {
                AppError::NotFound(format!("Contact not found: {}", id))
            }
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}

impl From<AvatarError> for AppError {
    fn from(err: AvatarError) -> Self {
        match err {
            AvatarError::Rejected(msg) => AppError::BadRequest(msg),
            AvatarError::Upstream(msg) => AppError::BadGateway(msg),
        }
    }
}
