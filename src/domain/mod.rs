//! Catalog entities and the value types they are built from.

pub mod category;
pub mod product;
pub mod types;
pub mod upload;
