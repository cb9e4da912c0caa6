//! Core library exports for the Mohar catalog service.
//!
//! The `data` feature exposes the catalog layer: domain types, the editor
//! workflow, repository traits, synchronization services and display helpers.
//! The `server` feature adds the remote store client, forms and the Actix-web
//! routes of the admin and storefront views.

pub mod domain;
pub mod editor;
pub mod error_conversions;
pub mod repository;
pub mod services;
pub mod views;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
