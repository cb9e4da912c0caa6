//! Error conversion glue between layers.
//!
//! The domain and repository layers must not depend on service error types,
//! so the `From` implementations live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;
#[cfg(feature = "server")]
use crate::repository::UploadError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        ServiceError::Transport(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(val: reqwest::Error) -> Self {
        if val.is_decode() {
            RepositoryError::Decode(val.to_string())
        } else {
            RepositoryError::Transport(val.to_string())
        }
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for UploadError {
    fn from(val: reqwest::Error) -> Self {
        UploadError::Transport(val.to_string())
    }
}
