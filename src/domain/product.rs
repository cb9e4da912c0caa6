use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ImageUrl, PriceText, ProductId, ProductName};

/// Product record as served by the remote catalog.
///
/// The store embeds extra data (such as the owning category) which is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub image_url: ImageUrl,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actual_price: PriceText,
    #[serde(default)]
    pub discounted_price: PriceText,
    pub category_id: CategoryId,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body sent to the store when creating or updating a [`Product`].
///
/// Prices are integers; a price that is not a number is sent as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: ProductName,
    pub description: String,
    pub actual_price: Option<i64>,
    pub discounted_price: Option<i64>,
    pub image_url: ImageUrl,
    pub category_id: CategoryId,
}
