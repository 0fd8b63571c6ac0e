//! Seeding against a live MongoDB.
//!
//! Run with `cargo test -p amazonas-integration-tests -- --ignored`.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use amazonas_core::{CollectionKind, PaymentStatus, SchemaGeneration};
use amazonas_db::{DbError, Fixtures};
use amazonas_db::models::{Cart, Order, Payment, Product, Review};
use amazonas_integration_tests::TestContext;
use bson::doc;

// =============================================================================
// Full run
// =============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_seed_all_v2_populates_every_collection() {
    let ctx = TestContext::new(SchemaGeneration::V2).await.unwrap();
    ctx.provision().await.unwrap();

    let report = ctx.seeder().unwrap().seed_all().await.unwrap();
    assert_eq!(report.skipped(), 0);

    for kind in CollectionKind::ALL {
        assert_eq!(ctx.count(kind).await.unwrap(), 2, "{kind}");
    }

    let orders: Vec<Order> = ctx.all(CollectionKind::Orders).await.unwrap();
    for order in &orders {
        assert!(order.total_matches_items());
        assert!(order.customer_snapshot.is_some());
        assert!(order.items.iter().all(|item| item.product_snapshot.is_some()));
        let summary = order.payment_summary.as_ref().unwrap();
        assert!(summary.payment_id.is_none());
        assert_eq!(summary.status, Some(PaymentStatus::Pending));
    }

    let payments: Vec<Payment> = ctx.all(CollectionKind::Payments).await.unwrap();
    for payment in &payments {
        let order = orders
            .iter()
            .find(|o| o.order_id == payment.order_id)
            .unwrap();
        assert_eq!(payment.amount, order.total_amount);
    }

    let reviews: Vec<Review> = ctx.all(CollectionKind::Reviews).await.unwrap();
    for review in &reviews {
        assert!((3..=5).contains(&review.rating.stars()));
        assert!(review.product_snapshot.is_some());
    }

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_seed_all_v1_stores_references_only() {
    let ctx = TestContext::new(SchemaGeneration::V1).await.unwrap();
    ctx.provision().await.unwrap();
    ctx.seeder().unwrap().seed_all().await.unwrap();

    let carts: Vec<Cart> = ctx.all(CollectionKind::Carts).await.unwrap();
    assert!(
        carts
            .iter()
            .flat_map(|cart| &cart.items)
            .all(|item| item.product_snapshot.is_none())
    );

    let orders: Vec<Order> = ctx.all(CollectionKind::Orders).await.unwrap();
    for order in &orders {
        assert!(order.customer_snapshot.is_none());
        assert!(order.payment_summary.is_none());
        assert!(order.items.iter().all(|item| item.unit_price.is_some()));
        assert!(order.total_matches_items());
    }

    let reviews: Vec<Review> = ctx.all(CollectionKind::Reviews).await.unwrap();
    assert!(reviews.iter().all(|review| review.customer_snapshot.is_none()));

    ctx.cleanup().await.unwrap();
}

// =============================================================================
// Snapshots
// =============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_order_snapshot_survives_product_update() {
    let ctx = TestContext::new(SchemaGeneration::V2).await.unwrap();
    ctx.provision().await.unwrap();
    ctx.seeder().unwrap().seed_all().await.unwrap();

    let before: Vec<Order> = ctx.all(CollectionKind::Orders).await.unwrap();

    ctx.db
        .collection::<Product>("products")
        .update_many(
            doc! {},
            doc! { "$set": { "price": 1.0, "title": "Renamed" } },
        )
        .await
        .unwrap();

    let after: Vec<Order> = ctx.all(CollectionKind::Orders).await.unwrap();
    assert_eq!(before, after);
    for order in &after {
        for item in &order.items {
            let snapshot = item.product_snapshot.as_ref().unwrap();
            assert_ne!(snapshot.title, "Renamed");
        }
    }

    ctx.cleanup().await.unwrap();
}

// =============================================================================
// Reviews
// =============================================================================

const ONE_PRODUCT: &str = r"
customers:
  - { name: Ana, email: ana@example.com }
  - { name: Bruno, email: bruno@example.com }
products:
  - { product_id: SKU-001, title: Kindle, category: Livros, price: 499.90 }
";

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_reseeding_reviews_skips_duplicates() {
    let ctx = TestContext::new(SchemaGeneration::V2).await.unwrap();
    ctx.provision().await.unwrap();
    let mut seeder = ctx.seeder_with(Fixtures::from_yaml(ONE_PRODUCT).unwrap());
    seeder.seed_all().await.unwrap();
    assert_eq!(ctx.count(CollectionKind::Reviews).await.unwrap(), 2);

    // Every customer already reviewed the only product.
    let (inserted, skipped) = seeder.seed_reviews().await.unwrap();
    assert_eq!((inserted, skipped), (0, 2));
    assert_eq!(ctx.count(CollectionKind::Reviews).await.unwrap(), 2);

    let reviews: Vec<Review> = ctx.all(CollectionKind::Reviews).await.unwrap();
    let pairs: HashSet<_> = reviews
        .iter()
        .map(|r| (r.product_id.clone(), r.customer_id.clone()))
        .collect();
    assert_eq!(pairs.len(), reviews.len());

    ctx.cleanup().await.unwrap();
}

// =============================================================================
// Ordering
// =============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_seeding_carts_before_customers_fails() {
    let ctx = TestContext::new(SchemaGeneration::V2).await.unwrap();
    ctx.provision().await.unwrap();

    let result = ctx.seeder().unwrap().seed(CollectionKind::Carts).await;
    assert!(matches!(
        result,
        Err(DbError::MissingReference {
            dependent: CollectionKind::Carts,
            collection: CollectionKind::Customers,
        })
    ));
    assert_eq!(ctx.count(CollectionKind::Carts).await.unwrap(), 0);

    ctx.cleanup().await.unwrap();
}
