use serde::Serialize;

use crate::domain::product::Product;
use crate::views::{discount_percent, order_link};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub actual_price: String,
    pub discounted_price: String,
    /// The actual price is struck through only when it differs.
    pub show_actual_price: bool,
    /// Present only when the discount is strictly positive.
    pub discount_percent: Option<i64>,
    pub order_url: Option<String>,
}

impl ProductDto {
    /// Admin listing: no order link.
    pub fn for_admin(product: &Product) -> Self {
        Self::build(product, None)
    }

    /// Storefront listing with an order deep link to `order_phone`.
    pub fn for_storefront(product: &Product, order_phone: &str) -> Self {
        Self::build(product, Some(order_link(order_phone, product.name.as_str())))
    }

    fn build(product: &Product, order_url: Option<String>) -> Self {
        let discount = discount_percent(&product.actual_price, &product.discounted_price);
        Self {
            id: product.id.as_str().to_string(),
            name: product.name.as_str().to_string(),
            description: product.description.clone(),
            image_url: product.image_url.as_str().to_string(),
            actual_price: product.actual_price.as_str().to_string(),
            discounted_price: product.discounted_price.as_str().to_string(),
            show_actual_price: product.actual_price != product.discounted_price,
            discount_percent: (discount > 0).then_some(discount),
            order_url,
        }
    }
}
