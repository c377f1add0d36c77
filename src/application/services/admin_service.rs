//! Collection administration service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::CatalogAdmin;
use crate::error::AppError;

/// Minimum size the server accepts for a capped collection.
const MIN_CAPPED_BYTES: u64 = 4096;

/// Collection names plus their count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub names: Vec<String>,
    pub count: usize,
}

/// Service for database-level collection administration.
pub struct AdminService<A: CatalogAdmin> {
    admin: Arc<A>,
}

impl<A: CatalogAdmin> AdminService<A> {
    /// Creates a new admin service.
    pub fn new(admin: Arc<A>) -> Self {
        Self { admin }
    }

    /// Lists collection names together with their count.
    pub async fn collection_summary(&self) -> Result<CollectionSummary, AppError> {
        let names = self.admin.list_collections().await?;
        let count = names.len();

        Ok(CollectionSummary { names, count })
    }

    /// Creates a capped collection bounded by document count and size.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is empty, `max_docs` is
    /// zero, or `max_bytes` is below the server minimum of 4096.
    pub async fn create_capped_collection(
        &self,
        name: &str,
        max_docs: u64,
        max_bytes: u64,
    ) -> Result<(), AppError> {
        validate_collection_name(name)?;

        if max_docs == 0 {
            return Err(AppError::bad_request(
                "Capped collection must allow at least one document",
                json!({ "max_docs": max_docs }),
            ));
        }

        if max_bytes < MIN_CAPPED_BYTES {
            return Err(AppError::bad_request(
                format!("Capped collection size must be at least {} bytes", MIN_CAPPED_BYTES),
                json!({ "max_bytes": max_bytes }),
            ));
        }

        self.admin
            .create_capped_collection(name, max_docs, max_bytes)
            .await
    }

    /// Drops a collection by name.
    pub async fn drop_collection(&self, name: &str) -> Result<(), AppError> {
        validate_collection_name(name)?;
        self.admin.drop_collection(name).await
    }
}

/// Validates a collection name before it reaches the server.
///
/// The server has its own rules; this catches the obviously invalid cases
/// (empty, `$`-prefixed, `system.` namespace) with a clearer message.
fn validate_collection_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::bad_request(
            "Collection name must not be empty",
            json!({}),
        ));
    }

    if name.starts_with('$') || name.starts_with("system.") {
        return Err(AppError::bad_request(
            "Collection name uses a reserved namespace",
            json!({ "name": name }),
        ));
    }

    Ok(())
}
