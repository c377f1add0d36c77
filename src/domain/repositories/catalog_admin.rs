//! Repository trait for database-level collection administration.

use crate::error::AppError;
use async_trait::async_trait;

/// Administrative operations on the catalog database.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MongoCatalogAdmin`] - MongoDB implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogAdmin: Send + Sync {
    /// Lists the names of all collections in the database.
    async fn list_collections(&self) -> Result<Vec<String>, AppError>;

    /// Creates a capped collection bounded by document count and size in bytes.
    async fn create_capped_collection(
        &self,
        name: &str,
        max_docs: u64,
        max_bytes: u64,
    ) -> Result<(), AppError>;

    /// Drops a collection. Dropping a non-existent collection is not an error.
    async fn drop_collection(&self, name: &str) -> Result<(), AppError>;
}
