//! Business logic shared by the HTTP handlers.
//!
//! Services are plain functions generic over the repository traits they
//! need, so they run unchanged against Diesel or the mocks.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod client;
pub mod page;
pub mod service_order;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    /// The operation would break a reference held by other rows.
    #[error("{0}")]
    DataIntegrity(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("failed to deliver notification: {0}")]
    Notification(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("Objeto não encontrado".to_string()),
            RepositoryError::ConstraintViolation(msg) => ServiceError::Conflict(msg),
            RepositoryError::ForeignKeyViolation(msg) => ServiceError::DataIntegrity(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
