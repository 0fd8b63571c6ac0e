//! Provisioning against a live MongoDB.
//!
//! Run with `cargo test -p amazonas-integration-tests -- --ignored`.

#![allow(clippy::unwrap_used)]

use amazonas_core::{CollectionKind, SchemaGeneration};
use amazonas_db::provision::CollectionOutcome;
use amazonas_integration_tests::TestContext;
use bson::{DateTime, Document, doc};

// =============================================================================
// Idempotence
// =============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_provision_twice_is_idempotent() {
    let ctx = TestContext::new(SchemaGeneration::V2).await.unwrap();

    let first = ctx.provision().await.unwrap();
    assert_eq!(first.created(), CollectionKind::ALL.len());

    let second = ctx.provision().await.unwrap();
    assert_eq!(second.created(), 0);
    assert!(
        second
            .collections
            .iter()
            .all(|c| c.outcome == CollectionOutcome::AlreadyExisted)
    );

    for (a, b) in first.collections.iter().zip(&second.collections) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.indexes, b.indexes);
    }

    let mut names = ctx.db.list_collection_names().await.unwrap();
    names.sort();
    let mut expected: Vec<&str> = CollectionKind::ALL.iter().map(|k| k.name()).collect();
    expected.sort_unstable();
    assert_eq!(names, expected);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_review_pair_index_exists() {
    let ctx = TestContext::new(SchemaGeneration::V1).await.unwrap();
    ctx.provision().await.unwrap();

    let names = ctx
        .db
        .collection::<Document>("reviews")
        .list_index_names()
        .await
        .unwrap();
    assert!(names.iter().any(|n| n == "ux_product_customer_review"));
    assert!(names.iter().any(|n| n == "ux_review_id"));

    ctx.cleanup().await.unwrap();
}

// =============================================================================
// Validators
// =============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_validator_rejects_out_of_range_rating() {
    let ctx = TestContext::new(SchemaGeneration::V2).await.unwrap();
    ctx.provision().await.unwrap();

    let reviews = ctx.db.collection::<Document>("reviews");
    let invalid = doc! {
        "review_id": "r-1",
        "product_id": "SKU-001",
        "customer_id": "c-1",
        "rating": 7,
        "created_at": DateTime::now(),
    };
    assert!(reviews.insert_one(invalid).await.is_err());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_validator_rejects_unknown_order_status() {
    let ctx = TestContext::new(SchemaGeneration::V1).await.unwrap();
    ctx.provision().await.unwrap();

    let orders = ctx.db.collection::<Document>("orders");
    let invalid = doc! {
        "order_id": "o-1",
        "customer_id": "c-1",
        "status": "LOST",
        "items": [],
        "total_amount": 0.0,
        "currency": "BRL",
        "created_at": DateTime::now(),
    };
    assert!(orders.insert_one(invalid).await.is_err());

    ctx.cleanup().await.unwrap();
}
