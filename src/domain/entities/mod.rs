//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures that represent the core
//! concepts of the restaurant catalog. Entities are plain data structures
//! without business logic.
//!
//! # Entity Types
//!
//! - [`Restaurant`] - A catalog entry with address, cuisine, and inspection grades
//! - [`Address`] - Nested street address with a coordinate pair
//! - [`Grade`] - A dated inspection grade with a numeric score
//!
//! # Design Pattern
//!
//! Partial updates use a dedicated patch struct:
//! - [`RestaurantPatch`] - `None` fields are left unchanged
//!
//! All entities include unit tests demonstrating their construction and usage.

pub mod restaurant;

pub use restaurant::{Address, Grade, Restaurant, RestaurantPatch};
