#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use restaurant_catalog::prelude::*;

pub fn sample_restaurant(name: &str, cuisine: &str, borough: &str, restaurant_id: &str) -> Restaurant {
    Restaurant {
        id: Some(ObjectId::new()),
        address: Address {
            building: "1480".to_string(),
            street: "2 Avenue".to_string(),
            zipcode: "10075".to_string(),
            coord: vec![-73.9557413, 40.7720266],
        },
        borough: borough.to_string(),
        cuisine: cuisine.to_string(),
        grades: vec![Grade {
            date: Utc::now(),
            grade: "A".to_string(),
            score: 11,
        }],
        name: name.to_string(),
        restaurant_id: restaurant_id.to_string(),
    }
}

/// In-memory stand-in for the restaurant repository.
///
/// Returns canned documents and records every call so tests can assert on
/// the filters and patches the services build.
#[derive(Default)]
pub struct StubRestaurantRepository {
    pub restaurants: Vec<Restaurant>,
    pub inserted: Mutex<Vec<Restaurant>>,
    pub find_queries: Mutex<Vec<FindQuery>>,
    pub updates: Mutex<Vec<(Filter, RestaurantPatch)>>,
    pub deletes: Mutex<Vec<Filter>>,
    pub index_ensured: AtomicBool,
}

impl StubRestaurantRepository {
    pub fn with_restaurants(restaurants: Vec<Restaurant>) -> Self {
        Self {
            restaurants,
            ..Default::default()
        }
    }
}

#[async_trait]
impl RestaurantRepository for StubRestaurantRepository {
    async fn insert_one(&self, restaurant: Restaurant) -> Result<ObjectId, AppError> {
        self.inserted.lock().unwrap().push(restaurant);
        Ok(ObjectId::new())
    }

    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> Result<usize, AppError> {
        let count = restaurants.len();
        self.inserted.lock().unwrap().extend(restaurants);
        Ok(count)
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Restaurant>, AppError> {
        self.find_queries.lock().unwrap().push(query);
        Ok(self.restaurants.clone())
    }

    async fn find_one(&self, _filter: Filter) -> Result<Option<Restaurant>, AppError> {
        Ok(self.restaurants.first().cloned())
    }

    async fn update_one(
        &self,
        filter: Filter,
        patch: RestaurantPatch,
    ) -> Result<UpdateReport, AppError> {
        self.updates.lock().unwrap().push((filter, patch));
        Ok(UpdateReport {
            matched: 1,
            modified: 1,
        })
    }

    async fn update_many(
        &self,
        filter: Filter,
        patch: RestaurantPatch,
    ) -> Result<UpdateReport, AppError> {
        let matched = self.restaurants.len() as u64;
        self.updates.lock().unwrap().push((filter, patch));
        Ok(UpdateReport {
            matched,
            modified: matched,
        })
    }

    async fn delete_one(&self, filter: Filter) -> Result<u64, AppError> {
        self.deletes.lock().unwrap().push(filter);
        Ok(1)
    }

    async fn delete_many(&self, filter: Filter) -> Result<u64, AppError> {
        self.deletes.lock().unwrap().push(filter);
        Ok(self.restaurants.len() as u64)
    }

    async fn count(&self, _filter: Filter) -> Result<u64, AppError> {
        Ok(self.restaurants.len() as u64)
    }

    async fn ensure_restaurant_id_index(&self) -> Result<String, AppError> {
        self.index_ensured.store(true, Ordering::SeqCst);
        Ok("restaurant_id_index".to_string())
    }
}

/// In-memory stand-in for collection administration.
#[derive(Default)]
pub struct StubCatalogAdmin {
    pub collections: Vec<String>,
    pub created: Mutex<Vec<(String, u64, u64)>>,
    pub dropped: Mutex<Vec<String>>,
}

impl StubCatalogAdmin {
    pub fn with_collections(collections: Vec<String>) -> Self {
        Self {
            collections,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CatalogAdmin for StubCatalogAdmin {
    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        Ok(self.collections.clone())
    }

    async fn create_capped_collection(
        &self,
        name: &str,
        max_docs: u64,
        max_bytes: u64,
    ) -> Result<(), AppError> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), max_docs, max_bytes));
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<(), AppError> {
        self.dropped.lock().unwrap().push(name.to_string());
        Ok(())
    }
}
