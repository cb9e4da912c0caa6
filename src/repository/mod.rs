use async_trait::async_trait;

use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, ImageUrl, ProductId};
use crate::domain::upload::SelectedFile;

pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(feature = "server")]
pub mod imgbb;

pub use errors::{RepositoryError, RepositoryResult, UploadError};

/// Read-only operations for category entities.
#[async_trait]
pub trait CategoryReader: Send + Sync {
    /// Read the full category collection.
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations for category entities.
#[async_trait]
pub trait CategoryWriter: Send + Sync {
    /// Create a category; the store assigns its id.
    async fn create_category(&self, category: &NewCategory) -> RepositoryResult<()>;
    /// Replace name and image of a category.
    async fn update_category(&self, id: &CategoryId, category: &NewCategory)
    -> RepositoryResult<()>;
    /// Delete a category. Products referencing it are left untouched.
    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()>;
}

/// Read-only operations for product entities.
#[async_trait]
pub trait ProductReader: Send + Sync {
    /// Read the full, unfiltered product collection.
    async fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

/// Write operations for product entities.
#[async_trait]
pub trait ProductWriter: Send + Sync {
    async fn create_product(&self, product: &NewProduct) -> RepositoryResult<()>;
    async fn update_product(&self, id: &ProductId, product: &NewProduct) -> RepositoryResult<()>;
    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}

/// Third-party image hosting.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload `file` and return its public URL.
    async fn upload_image(&self, file: &SelectedFile) -> Result<ImageUrl, UploadError>;
}
