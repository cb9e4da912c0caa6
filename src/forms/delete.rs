use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Delete button form. `confirmed` is filled in by the confirmation prompt.
#[derive(Deserialize, Validate)]
pub struct DeleteForm {
    #[serde(default)]
    #[validate(length(max = 5))]
    pub confirmed: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteFormPayload {
    pub confirmed: bool,
}

#[derive(Debug, Error)]
pub enum DeleteFormError {
    #[error("Delete form validation failed: {0}")]
    Validation(String),
    #[error("Unexpected confirmation value: {0}")]
    Confirmation(String),
}

impl From<ValidationErrors> for DeleteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<DeleteForm> for DeleteFormPayload {
    type Error = DeleteFormError;

    fn try_from(value: DeleteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let confirmed = match value.confirmed.as_deref().map(str::trim) {
            None | Some("") | Some("false") => false,
            Some("true") | Some("on") => true,
            Some(other) => return Err(DeleteFormError::Confirmation(other.to_string())),
        };
        Ok(Self { confirmed })
    }
}
