use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::upload::SelectedFile;
use crate::editor::CategoryFields;
use crate::forms::read_image;

#[derive(Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}

/// Multipart body of the category editor dialog.
#[derive(MultipartForm)]
pub struct CategoryUploadForm {
    pub name: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub fields: CategoryFields,
    pub image: Option<SelectedFile>,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Error reading image file")]
    FileRead,
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<std::io::Error> for CategoryFormError {
    fn from(_: std::io::Error) -> Self {
        Self::FileRead
    }
}

impl CategoryFormPayload {
    pub fn new(form: CategoryForm, image: Option<SelectedFile>) -> Result<Self, CategoryFormError> {
        form.validate()?;
        Ok(Self {
            fields: CategoryFields {
                name: form.name.trim().to_string(),
            },
            image,
        })
    }
}

impl TryFrom<CategoryUploadForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryUploadForm) -> Result<Self, Self::Error> {
        let image = read_image(value.image)?;
        Self::new(
            CategoryForm {
                name: value.name.into_inner(),
            },
            image,
        )
    }
}
