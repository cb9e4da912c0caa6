use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::{
    CategoryReader, CategoryWriter, ProductReader, ProductWriter, RepositoryError,
    RepositoryResult,
};

const CATEGORY_PATH: &str = "api/category";
const PRODUCTS_PATH: &str = "api/products";

/// Remote catalog store reached over JSON/HTTPS.
///
/// `reqwest::Client` keeps an internal connection pool and is cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpCatalogStore {
    client: Client,
    base_url: String,
}

impl HttpCatalogStore {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn item_url(&self, path: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, path, id)
    }

    fn ensure_success(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RepositoryError::Status(status.as_u16()))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> RepositoryResult<T> {
        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response)?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + Sync>(&self, url: String, body: &B) -> RepositoryResult<()> {
        let response = self.client.post(&url).json(body).send().await?;
        Self::ensure_success(response).map(|_| ())
    }

    async fn put_json<B: Serialize + Sync>(&self, url: String, body: &B) -> RepositoryResult<()> {
        let response = self.client.put(&url).json(body).send().await?;
        Self::ensure_success(response).map(|_| ())
    }

    async fn delete(&self, url: String) -> RepositoryResult<()> {
        let response = self.client.delete(&url).send().await?;
        Self::ensure_success(response).map(|_| ())
    }
}

#[async_trait]
impl CategoryReader for HttpCatalogStore {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.get_json(self.url(CATEGORY_PATH)).await
    }
}

#[async_trait]
impl CategoryWriter for HttpCatalogStore {
    async fn create_category(&self, category: &NewCategory) -> RepositoryResult<()> {
        self.post_json(self.url(CATEGORY_PATH), category).await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<()> {
        self.put_json(self.item_url(CATEGORY_PATH, id.as_str()), category)
            .await
    }

    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()> {
        self.delete(self.item_url(CATEGORY_PATH, id.as_str())).await
    }
}

#[async_trait]
impl ProductReader for HttpCatalogStore {
    async fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        self.get_json(self.url(PRODUCTS_PATH)).await
    }
}

#[async_trait]
impl ProductWriter for HttpCatalogStore {
    async fn create_product(&self, product: &NewProduct) -> RepositoryResult<()> {
        self.post_json(self.url(PRODUCTS_PATH), product).await
    }

    async fn update_product(&self, id: &ProductId, product: &NewProduct) -> RepositoryResult<()> {
        self.put_json(self.item_url(PRODUCTS_PATH, id.as_str()), product)
            .await
    }

    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        self.delete(self.item_url(PRODUCTS_PATH, id.as_str())).await
    }
}
