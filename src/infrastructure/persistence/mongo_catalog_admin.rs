//! MongoDB implementation of database-level administration.

use async_trait::async_trait;
use mongodb::Database;

use crate::domain::repositories::CatalogAdmin;
use crate::error::AppError;

/// MongoDB implementation of [`CatalogAdmin`].
#[derive(Clone)]
pub struct MongoCatalogAdmin {
    database: Database,
}

impl MongoCatalogAdmin {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl CatalogAdmin for MongoCatalogAdmin {
    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        Ok(self.database.list_collection_names().await?)
    }

    async fn create_capped_collection(
        &self,
        name: &str,
        max_docs: u64,
        max_bytes: u64,
    ) -> Result<(), AppError> {
        self.database
            .create_collection(name)
            .capped(true)
            .max(max_docs)
            .size(max_bytes)
            .await?;

        tracing::info!("Created capped collection '{}'", name);
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<(), AppError> {
        // The server treats dropping a missing collection as a no-op.
        self.database
            .collection::<bson::Document>(name)
            .drop()
            .await?;

        tracing::info!("Dropped collection '{}'", name);
        Ok(())
    }
}
