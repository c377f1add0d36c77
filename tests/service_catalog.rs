mod common;

use std::sync::Arc;

use bson::doc;
use common::{StubRestaurantRepository, sample_restaurant};
use restaurant_catalog::prelude::*;

#[tokio::test]
async fn test_seed_inserts_demo_then_derived_batch() {
    let repo = Arc::new(StubRestaurantRepository::with_restaurants(vec![
        sample_restaurant("Vella", "Italian", "Manhattan", "41704620"),
    ]));
    let service = CatalogService::new(repo.clone());

    let report = service.seed(2).await.unwrap();
    assert_eq!(report.batch_inserted, 2);

    let inserted = repo.inserted.lock().unwrap();
    // One demo document plus the derived batch.
    assert_eq!(inserted.len(), 3);

    // Derived copies come from the existing document, not the demo record.
    assert_eq!(inserted[1].cuisine, "Italian");
    assert_eq!(inserted[1].name, "Seeded Restaurant 1");
    assert_eq!(inserted[2].name, "Seeded Restaurant 2");
    assert!(inserted[1].id.is_none());
    assert_ne!(inserted[1].restaurant_id, inserted[2].restaurant_id);
}

#[tokio::test]
async fn test_search_sends_and_filter_with_skip_and_limit() {
    let repo = Arc::new(StubRestaurantRepository::default());
    let service = CatalogService::new(repo.clone());

    let page = PageParams {
        page: Some(2),
        page_size: Some(2),
    };
    service.search("American", "Queens", page).await.unwrap();

    let queries = repo.find_queries.lock().unwrap();
    assert_eq!(queries.len(), 1);

    let query = &queries[0];
    assert_eq!(
        query.filter.to_document(),
        doc! { "$and": [ { "cuisine": "American" }, { "borough": "Queens" } ] }
    );
    assert_eq!(query.skip, Some(2));
    assert_eq!(query.limit, Some(2));
    assert!(query.sort.is_none());
}

#[tokio::test]
async fn test_browse_creates_index_and_sorts_ascending() {
    let repo = Arc::new(StubRestaurantRepository::default());
    let service = CatalogService::new(repo.clone());

    service
        .browse_by_restaurant_id("40000000", 200)
        .await
        .unwrap();

    assert!(repo.index_ensured.load(std::sync::atomic::Ordering::SeqCst));

    let queries = repo.find_queries.lock().unwrap();
    let query = &queries[0];
    assert_eq!(
        query.filter.to_document(),
        doc! { "restaurant_id": { "$gte": "40000000" } }
    );
    assert_eq!(query.sort_document(), Some(doc! { "restaurant_id": 1 }));
    assert_eq!(query.limit, Some(200));
}

#[tokio::test]
async fn test_rename_cuisine_sets_both_counts() {
    let repo = Arc::new(StubRestaurantRepository::with_restaurants(vec![
        sample_restaurant("A", "American", "Queens", "1"),
        sample_restaurant("B", "American", "Queens", "2"),
    ]));
    let service = CatalogService::new(repo.clone());

    let report = service.rename_cuisine("American", "Indian").await.unwrap();
    assert_eq!(report.matched, 2);
    assert_eq!(report.modified, 2);

    let updates = repo.updates.lock().unwrap();
    let (filter, patch) = &updates[0];
    assert_eq!(filter.to_document(), doc! { "cuisine": "American" });
    assert_eq!(
        patch.to_update_document(),
        doc! { "$set": { "cuisine": "Indian" } }
    );
}

#[tokio::test]
async fn test_reassign_restaurant_id_randomizes_new_id() {
    let repo = Arc::new(StubRestaurantRepository::default());
    let service = CatalogService::new(repo.clone());

    let report = service.reassign_restaurant_id("41704620").await.unwrap();
    assert_eq!(report.matched, 1);

    let updates = repo.updates.lock().unwrap();
    let (filter, patch) = &updates[0];
    assert_eq!(filter.to_document(), doc! { "restaurant_id": "41704620" });

    let new_id = patch.restaurant_id.as_deref().unwrap();
    assert_ne!(new_id, "41704620");
    assert!(new_id.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_delete_many_with_or_filter_targets_both_prefixes() {
    let repo = Arc::new(StubRestaurantRepository::with_restaurants(vec![
        sample_restaurant("Seeded Restaurant 1", "cuisine", "borough", "90000001"),
        sample_restaurant("Seeded Restaurant 2", "cuisine", "borough", "restaurantId"),
    ]));
    let service = CatalogService::new(repo.clone());

    let deleted = service
        .prune_all_seeded("Seeded", "restaurant")
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    let deletes = repo.deletes.lock().unwrap();
    assert_eq!(
        deletes[0].to_document(),
        doc! { "$or": [
            { "name": { "$regex": "^Seeded" } },
            { "restaurant_id": { "$regex": "^restaurant" } },
        ] }
    );
}

#[tokio::test]
async fn test_delete_one_uses_anchored_name_regex() {
    let repo = Arc::new(StubRestaurantRepository::default());
    let service = CatalogService::new(repo.clone());

    service.prune_seeded("Seeded").await.unwrap();

    let deletes = repo.deletes.lock().unwrap();
    assert_eq!(
        deletes[0].to_document(),
        doc! { "name": { "$regex": "^Seeded" } }
    );
}

#[tokio::test]
async fn test_any_restaurant_returns_first_document() {
    let repo = Arc::new(StubRestaurantRepository::with_restaurants(vec![
        sample_restaurant("Vella", "Italian", "Manhattan", "41704620"),
    ]));
    let service = CatalogService::new(repo);

    let found = service.any_restaurant().await.unwrap().unwrap();
    assert_eq!(found.name, "Vella");
}

#[tokio::test]
async fn test_any_restaurant_on_empty_collection() {
    let repo = Arc::new(StubRestaurantRepository::default());
    let service = CatalogService::new(repo);

    assert!(service.any_restaurant().await.unwrap().is_none());
}

#[tokio::test]
async fn test_validation_short_circuits_before_repository() {
    let repo = Arc::new(StubRestaurantRepository::default());
    let service = CatalogService::new(repo.clone());

    assert!(service.search("", "", PageParams::default()).await.is_err());
    assert!(service.rename_cuisine("X", "X").await.is_err());
    assert!(service.prune_seeded("").await.is_err());
    assert!(service.seed(0).await.is_err());

    assert!(repo.find_queries.lock().unwrap().is_empty());
    assert!(repo.updates.lock().unwrap().is_empty());
    assert!(repo.deletes.lock().unwrap().is_empty());
    assert!(repo.inserted.lock().unwrap().is_empty());
}
