//! Values derived from catalog entities for display.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::PriceText;

/// Characters escaped the same way as `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which product fields a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSearch {
    /// Admin listing: name only.
    Name,
    /// Storefront listing: name or description.
    NameOrDescription,
}

/// Percentage saved, rounded half up.
///
/// Returns 0 when either price is missing, zero or not a number, and when the
/// discounted price is not below the actual price.
pub fn discount_percent(actual: &PriceText, discounted: &PriceText) -> i64 {
    let (Some(actual), Some(discounted)) = (actual.as_number(), discounted.as_number()) else {
        return 0;
    };
    if actual == 0.0 || discounted == 0.0 {
        return 0;
    }
    let percent = ((actual - discounted) / actual * 100.0 + 0.5).floor();
    if percent.is_finite() && percent > 0.0 {
        percent as i64
    } else {
        0
    }
}

/// Case-insensitive substring match. An empty query matches everything.
pub fn matches_query(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

pub fn filter_categories<'a>(categories: &'a [Category], query: &str) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| matches_query(c.name.as_str(), query))
        .collect()
}

pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    search: ProductSearch,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| {
            matches_query(p.name.as_str(), query)
                || (search == ProductSearch::NameOrDescription
                    && matches_query(&p.description, query))
        })
        .collect()
}

/// Messaging deep link pre-filled with an order request for `product_name`.
pub fn order_link(phone: &str, product_name: &str) -> String {
    let message = format!("I would like to order {product_name}");
    format!(
        "https://wa.me/{phone}?text={}",
        utf8_percent_encode(&message, URI_COMPONENT)
    )
}
