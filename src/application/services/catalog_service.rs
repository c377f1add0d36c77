//! Catalog seeding, search, update, and pruning service.

use std::sync::Arc;

use bson::oid::ObjectId;
use rand::Rng;
use serde_json::json;

use crate::domain::entities::{Restaurant, RestaurantPatch};
use crate::domain::query::{Filter, FindQuery, PageParams, SortOrder};
use crate::domain::repositories::{RestaurantRepository, UpdateReport};
use crate::error::AppError;

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Id assigned to the single demo document.
    pub demo_id: ObjectId,
    /// Number of derived documents inserted in the batch.
    pub batch_inserted: usize,
}

/// Service for working with restaurant documents.
///
/// Validates input before any repository call and keeps filter construction
/// out of the CLI layer.
pub struct CatalogService<R: RestaurantRepository> {
    repository: Arc<R>,
}

impl<R: RestaurantRepository> CatalogService<R> {
    /// Creates a new catalog service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Seeds the collection with demo documents.
    ///
    /// Inserts one canned demo restaurant, then derives `count` copies from an
    /// existing document (the freshly inserted demo on an empty collection)
    /// with fresh names and randomized restaurant ids, and batch-inserts them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `count` is zero or above 1000.
    pub async fn seed(&self, count: u32) -> Result<SeedReport, AppError> {
        if count == 0 || count > 1000 {
            return Err(AppError::bad_request(
                "Seed count must be between 1 and 1000",
                json!({ "count": count }),
            ));
        }

        let demo_id = self.repository.insert_one(Restaurant::demo()).await?;
        tracing::info!("Seeded demo document with id {}", demo_id);

        let template = self
            .repository
            .find_one(Filter::All)
            .await?
            .unwrap_or_else(Restaurant::demo);

        let copies: Vec<Restaurant> = {
            let mut rng = rand::rng();
            (1..=count)
                .map(|n| {
                    template.derived(
                        format!("Seeded Restaurant {}", n),
                        rng.random_range(10_000_000..100_000_000u64).to_string(),
                    )
                })
                .collect()
        };

        let batch_inserted = self.repository.insert_many(copies).await?;
        tracing::info!("Seeded {} derived documents", batch_inserted);

        Ok(SeedReport {
            demo_id,
            batch_inserted,
        })
    }

    /// Returns one arbitrary document from the collection, if any.
    pub async fn any_restaurant(&self) -> Result<Option<Restaurant>, AppError> {
        self.repository.find_one(Filter::All).await
    }

    /// Finds restaurants matching both cuisine and borough, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either term is empty or the page
    /// parameters are out of bounds.
    pub async fn search(
        &self,
        cuisine: &str,
        borough: &str,
        page: PageParams,
    ) -> Result<Vec<Restaurant>, AppError> {
        if cuisine.is_empty() || borough.is_empty() {
            return Err(AppError::bad_request(
                "Cuisine and borough must not be empty",
                json!({ "cuisine": cuisine, "borough": borough }),
            ));
        }

        let (skip, limit) = page
            .validate_and_get_skip_limit()
            .map_err(|e| AppError::bad_request(e, json!({})))?;

        let query = FindQuery::new(Filter::and(vec![
            Filter::eq("cuisine", cuisine),
            Filter::eq("borough", borough),
        ]))
        .skip(skip)
        .limit(limit);

        self.repository.find(query).await
    }

    /// Lists restaurants whose `restaurant_id` is at or above `min_id`,
    /// ascending, backed by the `restaurant_id` index.
    ///
    /// The index is created on first use; subsequent calls are no-ops on the
    /// server side.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `min_id` is empty or `limit` is out
    /// of bounds.
    pub async fn browse_by_restaurant_id(
        &self,
        min_id: &str,
        limit: i64,
    ) -> Result<Vec<Restaurant>, AppError> {
        if min_id.is_empty() {
            return Err(AppError::bad_request(
                "Minimum restaurant id must not be empty",
                json!({}),
            ));
        }

        if !(1..=500).contains(&limit) {
            return Err(AppError::bad_request(
                "Limit must be between 1 and 500",
                json!({ "limit": limit }),
            ));
        }

        let index_name = self.repository.ensure_restaurant_id_index().await?;
        tracing::debug!("Using index {}", index_name);

        let query = FindQuery::new(Filter::gte("restaurant_id", min_id))
            .sort_by("restaurant_id", SortOrder::Asc)
            .limit(limit);

        self.repository.find(query).await
    }

    /// Replaces the `restaurant_id` of the first document carrying the given
    /// id with a fresh randomized one.
    pub async fn reassign_restaurant_id(
        &self,
        restaurant_id: &str,
    ) -> Result<UpdateReport, AppError> {
        if restaurant_id.is_empty() {
            return Err(AppError::bad_request(
                "Restaurant id must not be empty",
                json!({}),
            ));
        }

        let fresh_id = rand::rng()
            .random_range(10_000_000..100_000_000u64)
            .to_string();

        let patch = RestaurantPatch {
            restaurant_id: Some(fresh_id),
            ..Default::default()
        };

        self.repository
            .update_one(Filter::eq("restaurant_id", restaurant_id), patch)
            .await
    }

    /// Applies a multi-field patch to the first document carrying the given
    /// restaurant id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the id is empty or the patch sets
    /// no fields.
    pub async fn amend(
        &self,
        restaurant_id: &str,
        patch: RestaurantPatch,
    ) -> Result<UpdateReport, AppError> {
        if restaurant_id.is_empty() {
            return Err(AppError::bad_request(
                "Restaurant id must not be empty",
                json!({}),
            ));
        }

        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Patch must set at least one field",
                json!({}),
            ));
        }

        self.repository
            .update_one(Filter::eq("restaurant_id", restaurant_id), patch)
            .await
    }

    /// Renames a cuisine across every document that carries it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either name is empty or both are
    /// the same.
    pub async fn rename_cuisine(&self, from: &str, to: &str) -> Result<UpdateReport, AppError> {
        if from.is_empty() || to.is_empty() {
            return Err(AppError::bad_request(
                "Cuisine names must not be empty",
                json!({ "from": from, "to": to }),
            ));
        }

        if from == to {
            return Err(AppError::bad_request(
                "Old and new cuisine are the same",
                json!({ "cuisine": from }),
            ));
        }

        let patch = RestaurantPatch {
            cuisine: Some(to.to_string()),
            ..Default::default()
        };

        self.repository
            .update_many(Filter::eq("cuisine", from), patch)
            .await
    }

    /// Deletes the first document carrying the given restaurant id.
    pub async fn delete_by_restaurant_id(&self, restaurant_id: &str) -> Result<u64, AppError> {
        if restaurant_id.is_empty() {
            return Err(AppError::bad_request(
                "Restaurant id must not be empty",
                json!({}),
            ));
        }

        self.repository
            .delete_one(Filter::eq("restaurant_id", restaurant_id))
            .await
    }

    /// Deletes the first document whose name starts with `name_prefix`.
    pub async fn prune_seeded(&self, name_prefix: &str) -> Result<u64, AppError> {
        let pattern = anchored_prefix(name_prefix)?;
        self.repository
            .delete_one(Filter::regex("name", pattern))
            .await
    }

    /// Deletes every document whose name starts with `name_prefix` or whose
    /// restaurant id starts with `id_prefix`.
    pub async fn prune_all_seeded(
        &self,
        name_prefix: &str,
        id_prefix: &str,
    ) -> Result<u64, AppError> {
        let filter = Filter::or(vec![
            Filter::regex("name", anchored_prefix(name_prefix)?),
            Filter::regex("restaurant_id", anchored_prefix(id_prefix)?),
        ]);

        self.repository.delete_many(filter).await
    }

    /// Counts documents matching a cuisine, or all documents when `None`.
    pub async fn count(&self, cuisine: Option<&str>) -> Result<u64, AppError> {
        let filter = match cuisine {
            Some(cuisine) if !cuisine.is_empty() => Filter::eq("cuisine", cuisine),
            _ => Filter::All,
        };

        self.repository.count(filter).await
    }
}

/// Turns a user-supplied prefix into an anchored server-side regex pattern.
///
/// The prefix is escaped so regex metacharacters in user input match
/// literally.
fn anchored_prefix(prefix: &str) -> Result<String, AppError> {
    if prefix.is_empty() {
        return Err(AppError::bad_request(
            "Prefix must not be empty",
            json!({}),
        ));
    }

    Ok(format!("^{}", regex::escape(prefix)))
}
