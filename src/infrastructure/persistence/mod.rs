//! MongoDB repository implementations.
//!
//! Concrete implementations of domain repository traits using the official
//! MongoDB driver. The typed query model is rendered to BSON here, at the
//! boundary.
//!
//! # Repositories
//!
//! - [`MongoRestaurantRepository`] - Restaurant document storage and retrieval
//! - [`MongoCatalogAdmin`] - Database-level collection administration

pub mod mongo_catalog_admin;
pub mod mongo_restaurant_repository;

pub use mongo_catalog_admin::MongoCatalogAdmin;
pub use mongo_restaurant_repository::MongoRestaurantRepository;
