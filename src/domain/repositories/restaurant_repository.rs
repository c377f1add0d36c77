//! Repository trait for restaurant document access.

use crate::domain::entities::{Restaurant, RestaurantPatch};
use crate::domain::query::{Filter, FindQuery};
use crate::error::AppError;
use async_trait::async_trait;
use bson::oid::ObjectId;

/// Counts reported by an update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateReport {
    /// Documents matched by the filter.
    pub matched: u64,
    /// Documents actually modified.
    pub modified: u64,
}

/// Repository interface for restaurant documents.
///
/// Provides CRUD operations over the catalog collection, plus index
/// management for ranged `restaurant_id` queries.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MongoRestaurantRepository`] - MongoDB implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/service_catalog.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Inserts a single restaurant and returns the server-assigned id.
    async fn insert_one(&self, restaurant: Restaurant) -> Result<ObjectId, AppError>;

    /// Inserts a batch of restaurants and returns how many were inserted.
    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> Result<usize, AppError>;

    /// Runs a find query and collects all matching documents.
    async fn find(&self, query: FindQuery) -> Result<Vec<Restaurant>, AppError>;

    /// Returns the first document matching the filter, if any.
    async fn find_one(&self, filter: Filter) -> Result<Option<Restaurant>, AppError>;

    /// Applies a `$set` patch to the first matching document.
    async fn update_one(
        &self,
        filter: Filter,
        patch: RestaurantPatch,
    ) -> Result<UpdateReport, AppError>;

    /// Applies a `$set` patch to every matching document.
    async fn update_many(
        &self,
        filter: Filter,
        patch: RestaurantPatch,
    ) -> Result<UpdateReport, AppError>;

    /// Deletes the first matching document; returns the deleted count (0 or 1).
    async fn delete_one(&self, filter: Filter) -> Result<u64, AppError>;

    /// Deletes every matching document; returns the deleted count.
    async fn delete_many(&self, filter: Filter) -> Result<u64, AppError>;

    /// Counts documents matching the filter.
    async fn count(&self, filter: Filter) -> Result<u64, AppError>;

    /// Creates the background ascending index on `restaurant_id` if it does
    /// not already exist; returns the index name.
    async fn ensure_restaurant_id_index(&self) -> Result<String, AppError>;
}
