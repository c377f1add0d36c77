mod common;

use std::sync::Arc;

use common::StubCatalogAdmin;
use restaurant_catalog::prelude::*;

#[tokio::test]
async fn test_collection_summary_reports_names_and_count() {
    let admin = Arc::new(StubCatalogAdmin::with_collections(vec![
        "restaurants".to_string(),
        "neighborhoods".to_string(),
    ]));
    let service = AdminService::new(admin);

    let summary = service.collection_summary().await.unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.names, vec!["restaurants", "neighborhoods"]);
}

#[tokio::test]
async fn test_create_capped_collection_forwards_bounds() {
    let admin = Arc::new(StubCatalogAdmin::default());
    let service = AdminService::new(admin.clone());

    service
        .create_capped_collection("audit_log", 5000, 1_048_576)
        .await
        .unwrap();

    let created = admin.created.lock().unwrap();
    assert_eq!(created[0], ("audit_log".to_string(), 5000, 1_048_576));
}

#[tokio::test]
async fn test_create_capped_collection_validates_before_call() {
    let admin = Arc::new(StubCatalogAdmin::default());
    let service = AdminService::new(admin.clone());

    assert!(service.create_capped_collection("", 100, 8192).await.is_err());
    assert!(
        service
            .create_capped_collection("audit_log", 0, 8192)
            .await
            .is_err()
    );
    assert!(
        service
            .create_capped_collection("audit_log", 100, 100)
            .await
            .is_err()
    );

    assert!(admin.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_drop_collection_forwards_name() {
    let admin = Arc::new(StubCatalogAdmin::default());
    let service = AdminService::new(admin.clone());

    service.drop_collection("scratch").await.unwrap();

    assert_eq!(*admin.dropped.lock().unwrap(), vec!["scratch".to_string()]);
}

#[tokio::test]
async fn test_drop_collection_rejects_reserved_names() {
    let admin = Arc::new(StubCatalogAdmin::default());
    let service = AdminService::new(admin.clone());

    assert!(service.drop_collection("system.views").await.is_err());
    assert!(admin.dropped.lock().unwrap().is_empty());
}
