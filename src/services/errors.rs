use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The remote catalog could not be reached or refused the request.
    #[error("catalog request failed: {0}")]
    Transport(String),
    /// Client-side precondition not met; no request was issued.
    #[error("{0}")]
    Validation(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
