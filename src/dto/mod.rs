//! View-ready shapes handed to the templates.

pub mod categories;
pub mod editor;
pub mod products;
