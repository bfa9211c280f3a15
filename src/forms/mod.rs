//! Request bodies and query strings accepted by the API, with their
//! conversion into validated domain values.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod client;
pub mod page;
pub mod service_order;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid field `{field}`: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: TypeConstraintError,
    },

    #[error("`{0}` cannot be negative")]
    Negative(&'static str),
}

impl FormError {
    /// Wraps a value-object error with the name of the offending field.
    pub(crate) fn field(field: &'static str) -> impl FnOnce(TypeConstraintError) -> FormError {
        move |source| FormError::InvalidField { field, source }
    }
}
