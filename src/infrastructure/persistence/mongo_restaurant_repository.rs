//! MongoDB implementation of the restaurant repository.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde_json::json;

use crate::domain::entities::{Restaurant, RestaurantPatch};
use crate::domain::query::{Filter, FindQuery};
use crate::domain::repositories::{RestaurantRepository, UpdateReport};
use crate::error::AppError;

/// Name of the ascending `restaurant_id` index used by ranged browsing.
const RESTAURANT_ID_INDEX: &str = "restaurant_id_index";

/// MongoDB repository for restaurant documents.
///
/// Holds a typed collection handle; the driver's client manages pooling, so
/// the repository is cheap to clone and share.
#[derive(Clone)]
pub struct MongoRestaurantRepository {
    collection: Collection<Restaurant>,
}

impl MongoRestaurantRepository {
    /// Creates a repository over the named collection.
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
        }
    }
}

#[async_trait]
impl RestaurantRepository for MongoRestaurantRepository {
    async fn insert_one(&self, restaurant: Restaurant) -> Result<ObjectId, AppError> {
        let result = self.collection.insert_one(&restaurant).await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::internal(
                "Server returned a non-ObjectId insert id",
                json!({ "inserted_id": result.inserted_id.to_string() }),
            )
        })
    }

    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> Result<usize, AppError> {
        if restaurants.is_empty() {
            return Ok(0);
        }

        let result = self.collection.insert_many(&restaurants).await?;
        Ok(result.inserted_ids.len())
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Restaurant>, AppError> {
        let mut find = self.collection.find(query.filter.to_document());

        if let Some(sort) = query.sort_document() {
            find = find.sort(sort);
        }
        if let Some(limit) = query.limit {
            find = find.limit(limit);
        }
        if let Some(skip) = query.skip {
            find = find.skip(skip);
        }

        let mut cursor = find.await?;

        let mut restaurants = Vec::new();
        while let Some(restaurant) = cursor.try_next().await? {
            restaurants.push(restaurant);
        }

        Ok(restaurants)
    }

    async fn find_one(&self, filter: Filter) -> Result<Option<Restaurant>, AppError> {
        Ok(self.collection.find_one(filter.to_document()).await?)
    }

    async fn update_one(
        &self,
        filter: Filter,
        patch: RestaurantPatch,
    ) -> Result<UpdateReport, AppError> {
        let result = self
            .collection
            .update_one(filter.to_document(), patch.to_update_document())
            .await?;

        Ok(UpdateReport {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn update_many(
        &self,
        filter: Filter,
        patch: RestaurantPatch,
    ) -> Result<UpdateReport, AppError> {
        let result = self
            .collection
            .update_many(filter.to_document(), patch.to_update_document())
            .await?;

        Ok(UpdateReport {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: Filter) -> Result<u64, AppError> {
        let result = self.collection.delete_one(filter.to_document()).await?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, filter: Filter) -> Result<u64, AppError> {
        let result = self.collection.delete_many(filter.to_document()).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self, filter: Filter) -> Result<u64, AppError> {
        Ok(self
            .collection
            .count_documents(filter.to_document())
            .await?)
    }

    async fn ensure_restaurant_id_index(&self) -> Result<String, AppError> {
        let options = IndexOptions::builder()
            .name(RESTAURANT_ID_INDEX.to_string())
            .background(true)
            .build();

        let model = IndexModel::builder()
            .keys(doc! { "restaurant_id": 1 })
            .options(options)
            .build();

        // create_index is idempotent for an identical key spec and name.
        let result = self.collection.create_index(model).await?;
        Ok(result.index_name)
    }
}
