//! Business logic services for the application layer.

pub mod admin_service;
pub mod catalog_service;

pub use admin_service::{AdminService, CollectionSummary};
pub use catalog_service::{CatalogService, SeedReport};
