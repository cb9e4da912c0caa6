pub mod catalog;
pub mod editor;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};
