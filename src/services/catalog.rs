//! Catalog synchronization with the remote store.
//!
//! A catalog keeps the last collection it read. Reads that fail are logged
//! and leave that collection in place. The local list is never patched: after
//! a successful mutation the editor driver re-reads the whole collection.

use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::{CategoryReader, CategoryWriter, ProductReader, ProductWriter};
use crate::views::{self, ProductSearch};

use super::{ServiceError, ServiceResult};

/// Category collection backed by a remote store.
pub struct CategoryCatalog<'a, R> {
    repo: &'a R,
    categories: Vec<Category>,
}

impl<'a, R> CategoryCatalog<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            categories: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn search(&self, query: &str) -> Vec<&Category> {
        views::filter_categories(&self.categories, query)
    }
}

impl<R> CategoryCatalog<'_, R>
where
    R: CategoryReader,
{
    /// Re-reads the whole collection. Returns `false` when the read failed and
    /// the previous list was kept.
    pub async fn load(&mut self) -> bool {
        match self.repo.list_categories().await {
            Ok(categories) => {
                self.categories = categories;
                true
            }
            Err(e) => {
                log::error!("Error fetching categories: {e}");
                false
            }
        }
    }
}

/// Mutations. The loaded list is left as is; callers reload after success.
impl<R> CategoryCatalog<'_, R>
where
    R: CategoryWriter,
{
    pub async fn create(&self, category: &NewCategory) -> ServiceResult<()> {
        self.repo.create_category(category).await.map_err(|e| {
            log::error!("Error creating category: {e}");
            ServiceError::from(e)
        })
    }

    pub async fn update(&self, id: &CategoryId, category: &NewCategory) -> ServiceResult<()> {
        self.repo.update_category(id, category).await.map_err(|e| {
            log::error!("Error updating category {id}: {e}");
            ServiceError::from(e)
        })
    }

    /// Deletes the category only. Its products stay in the store, orphaned.
    pub async fn delete(&self, id: &CategoryId) -> ServiceResult<()> {
        self.repo.delete_category(id).await.map_err(|e| {
            log::error!("Error deleting category {id}: {e}");
            ServiceError::from(e)
        })
    }
}

/// Products of a single category.
///
/// The store has no per-category listing, so every load reads the whole
/// product collection and filters it here.
pub struct ProductCatalog<'a, R> {
    repo: &'a R,
    category_id: CategoryId,
    products: Vec<Product>,
}

impl<'a, R> ProductCatalog<'a, R> {
    pub fn new(repo: &'a R, category_id: CategoryId) -> Self {
        Self {
            repo,
            category_id,
            products: Vec::new(),
        }
    }

    pub(crate) fn repo(&self) -> &'a R {
        self.repo
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn search(&self, query: &str, search: ProductSearch) -> Vec<&Product> {
        views::filter_products(&self.products, query, search)
    }
}

impl<R> ProductCatalog<'_, R>
where
    R: ProductReader,
{
    /// Re-reads the product collection keeping this category's products in
    /// source order. Returns `false` when the read failed.
    pub async fn load(&mut self) -> bool {
        match self.repo.list_products().await {
            Ok(products) => {
                self.products = products
                    .into_iter()
                    .filter(|p| p.category_id == self.category_id)
                    .collect();
                true
            }
            Err(e) => {
                log::error!("Error fetching products: {e}");
                false
            }
        }
    }
}

impl<R> ProductCatalog<'_, R>
where
    R: ProductWriter,
{
    pub async fn create(&self, product: &NewProduct) -> ServiceResult<()> {
        self.repo.create_product(product).await.map_err(|e| {
            log::error!("Error creating product: {e}");
            ServiceError::from(e)
        })
    }

    pub async fn update(&self, id: &ProductId, product: &NewProduct) -> ServiceResult<()> {
        self.repo.update_product(id, product).await.map_err(|e| {
            log::error!("Error updating product {id}: {e}");
            ServiceError::from(e)
        })
    }

    pub async fn delete(&self, id: &ProductId) -> ServiceResult<()> {
        self.repo.delete_product(id).await.map_err(|e| {
            log::error!("Error deleting product {id}: {e}");
            ServiceError::from(e)
        })
    }
}
