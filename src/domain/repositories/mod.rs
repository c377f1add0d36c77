//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`RestaurantRepository`] - Restaurant document CRUD and index management
//! - [`CatalogAdmin`] - Database-level collection administration
//!
//! # Testing
//!
//! Service tests against the generated mocks live with the services; see
//! `tests/` for stub-backed tests through the public API.

pub mod catalog_admin;
pub mod restaurant_repository;

pub use catalog_admin::CatalogAdmin;
pub use restaurant_repository::{RestaurantRepository, UpdateReport};

#[cfg(test)]
pub use catalog_admin::MockCatalogAdmin;
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
