use thiserror::Error;

/// Failure talking to the remote catalog store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure uploading an image to the image host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("image upload transport error: {0}")]
    Transport(String),
    /// The host refused the upload.
    #[error("image upload rejected: {0}")]
    Rejected(String),
    /// The host reported success without a usable URL.
    #[error("no image URL received from image host")]
    Malformed,
}
