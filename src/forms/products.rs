use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CategoryId, TypeConstraintError};
use crate::domain::upload::SelectedFile;
use crate::editor::ProductFields;
use crate::forms::read_image;

/// Product editor fields. Prices are free text and are not checked here.
#[derive(Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    pub actual_price: String,
    pub discounted_price: String,
}

/// Multipart body of the product editor dialog.
#[derive(MultipartForm)]
pub struct ProductUploadForm {
    pub name: Text<String>,
    pub description: Text<String>,
    pub actual_price: Text<String>,
    pub discounted_price: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductFormPayload {
    pub name: String,
    pub description: String,
    pub actual_price: String,
    pub discounted_price: String,
    pub image: Option<SelectedFile>,
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Error reading image file")]
    FileRead,
    #[error("Invalid category: {0}")]
    Category(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<std::io::Error> for ProductFormError {
    fn from(_: std::io::Error) -> Self {
        Self::FileRead
    }
}

impl ProductFormPayload {
    pub fn new(form: ProductForm, image: Option<SelectedFile>) -> Result<Self, ProductFormError> {
        form.validate()?;
        Ok(Self {
            name: form.name.trim().to_string(),
            description: form.description,
            actual_price: form.actual_price,
            discounted_price: form.discounted_price,
            image,
        })
    }

    /// Editor fields for a product of `category_id`.
    pub fn fields(&self, category_id: &str) -> Result<ProductFields, ProductFormError> {
        Ok(ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            actual_price: self.actual_price.as_str().into(),
            discounted_price: self.discounted_price.as_str().into(),
            category_id: CategoryId::new(category_id)?,
        })
    }
}

impl TryFrom<ProductUploadForm> for ProductFormPayload {
    type Error = ProductFormError;

    fn try_from(value: ProductUploadForm) -> Result<Self, Self::Error> {
        let image = read_image(value.image)?;
        Self::new(
            ProductForm {
                name: value.name.into_inner(),
                description: value.description.into_inner(),
                actual_price: value.actual_price.into_inner(),
                discounted_price: value.discounted_price.into_inner(),
            },
            image,
        )
    }
}
