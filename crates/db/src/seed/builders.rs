//! Pure document builders for the dependent collections.
//!
//! Builders take the already-seeded referenced documents, a random number
//! generator and the event instant, and return the documents to insert.
//! They never touch the database, which keeps the snapshot and total rules
//! testable in isolation.

use std::ops::RangeInclusive;

use amazonas_core::{
    CollectionKind, OrderId, OrderStatus, PaymentId, PaymentMethod, PaymentStatus, Rating,
    ReviewId, SchemaGeneration,
};
use bson::DateTime;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{DbError, DbResult};
use crate::models::{
    Cart, CartItem, Customer, CustomerSnapshot, Order, OrderItem, OrderSummary, Payment,
    PaymentMetadata, PaymentSummary, Product, Review, ReviewProductSnapshot, ReviewerSnapshot,
};

/// Units of the chosen product placed in each cart.
pub const CART_QTY: RangeInclusive<u32> = 1..=2;
/// Units of the chosen product in each order.
pub const ORDER_QTY: RangeInclusive<u32> = 1..=3;
/// Stars given by sample reviews.
pub const REVIEW_STARS: RangeInclusive<u8> = 3..=5;
/// Range of the numeric part of `provider_ref`.
pub const PROVIDER_REF: RangeInclusive<u32> = 10_000..=99_999;
/// Card installments recorded in payment metadata.
pub const INSTALLMENTS: RangeInclusive<u32> = 1..=3;
/// Comment attached to every sample review.
pub const REVIEW_COMMENT: &str = "Entrega rápida e produto conforme descrição.";

fn require<T>(
    items: &[T],
    dependent: CollectionKind,
    collection: CollectionKind,
) -> DbResult<&[T]> {
    if items.is_empty() {
        Err(DbError::MissingReference {
            dependent,
            collection,
        })
    } else {
        Ok(items)
    }
}

fn pick<'a, R: Rng + ?Sized>(
    products: &'a [Product],
    dependent: CollectionKind,
    rng: &mut R,
) -> DbResult<&'a Product> {
    products.choose(rng).ok_or(DbError::MissingReference {
        dependent,
        collection: CollectionKind::Products,
    })
}

/// One cart per customer holding a random product.
///
/// # Errors
///
/// Returns [`DbError::MissingReference`] if there are no customers or no
/// products.
pub fn build_carts<R: Rng + ?Sized>(
    customers: &[Customer],
    products: &[Product],
    generation: SchemaGeneration,
    rng: &mut R,
    now: DateTime,
) -> DbResult<Vec<Cart>> {
    let customers = require(customers, CollectionKind::Carts, CollectionKind::Customers)?;
    customers
        .iter()
        .map(|customer| -> DbResult<Cart> {
            let product = pick(products, CollectionKind::Carts, rng)?;
            let qty = rng.random_range(CART_QTY);
            Ok(Cart {
                customer_id: customer.customer_id.clone(),
                items: vec![CartItem::new(product, qty, generation)],
                updated_at: now,
            })
        })
        .collect()
}

/// One placed order per customer for a random product.
///
/// # Errors
///
/// Returns [`DbError::MissingReference`] if there are no customers or no
/// products.
pub fn build_orders<R: Rng + ?Sized>(
    customers: &[Customer],
    products: &[Product],
    generation: SchemaGeneration,
    rng: &mut R,
    now: DateTime,
) -> DbResult<Vec<Order>> {
    let customers = require(customers, CollectionKind::Orders, CollectionKind::Customers)?;
    let denormalized = generation.is_denormalized();
    customers
        .iter()
        .map(|customer| -> DbResult<Order> {
            let product = pick(products, CollectionKind::Orders, rng)?;
            let qty = rng.random_range(ORDER_QTY);
            let items = vec![OrderItem::new(product, qty, generation)];
            Ok(Order {
                order_id: OrderId::generate(),
                customer_id: customer.customer_id.clone(),
                customer_snapshot: denormalized.then(|| CustomerSnapshot::from(customer)),
                status: OrderStatus::Placed,
                total_amount: Order::total_of(&items, product.currency),
                items,
                shipping_address: customer.default_address().cloned(),
                payment_summary: denormalized
                    .then(|| PaymentSummary::pending(PaymentMethod::CreditCard)),
                currency: product.currency,
                created_at: now,
                updated_at: None,
            })
        })
        .collect()
}

/// One review per customer for a random product.
///
/// Re-running against an existing review set may produce (product, customer)
/// pairs that already exist; the unique index rejects those at insert time.
///
/// # Errors
///
/// Returns [`DbError::MissingReference`] if there are no customers or no
/// products.
pub fn build_reviews<R: Rng + ?Sized>(
    customers: &[Customer],
    products: &[Product],
    generation: SchemaGeneration,
    rng: &mut R,
    now: DateTime,
) -> DbResult<Vec<Review>> {
    let customers = require(customers, CollectionKind::Reviews, CollectionKind::Customers)?;
    let denormalized = generation.is_denormalized();
    customers
        .iter()
        .map(|customer| -> DbResult<Review> {
            let product = pick(products, CollectionKind::Reviews, rng)?;
            Ok(Review {
                review_id: ReviewId::generate(),
                product_id: product.product_id.clone(),
                customer_id: customer.customer_id.clone(),
                rating: Rating::saturating(rng.random_range(REVIEW_STARS)),
                comment: Some(REVIEW_COMMENT.to_owned()),
                product_snapshot: denormalized.then(|| ReviewProductSnapshot::from(product)),
                customer_snapshot: denormalized.then(|| ReviewerSnapshot::from(customer)),
                created_at: now,
            })
        })
        .collect()
}

/// One authorized card payment per order, for the order's full amount.
///
/// # Errors
///
/// Returns [`DbError::MissingReference`] if there are no orders.
pub fn build_payments<R: Rng + ?Sized>(
    orders: &[OrderSummary],
    rng: &mut R,
    now: DateTime,
) -> DbResult<Vec<Payment>> {
    let orders = require(orders, CollectionKind::Payments, CollectionKind::Orders)?;
    Ok(orders
        .iter()
        .map(|order| Payment {
            payment_id: PaymentId::generate(),
            order_id: order.order_id.clone(),
            amount: order.total_amount,
            currency: order.currency,
            method: PaymentMethod::CreditCard,
            status: PaymentStatus::Authorized,
            provider_ref: Some(format!("PAY-{}", rng.random_range(PROVIDER_REF))),
            metadata: PaymentMetadata {
                installments: rng.random_range(INSTALLMENTS),
            },
            created_at: now,
            updated_at: None,
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use bson::Bson;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::money;
    use crate::seed::Fixtures;

    fn now() -> DateTime {
        DateTime::from_millis(1_760_000_000_000)
    }

    fn sample() -> (Vec<Customer>, Vec<Product>) {
        let fixtures = Fixtures::builtin().unwrap();
        let customers = fixtures
            .customers
            .into_iter()
            .map(|c| c.into_customer(now()))
            .collect();
        let products = fixtures
            .products
            .into_iter()
            .map(|p| p.into_product(now()))
            .collect();
        (customers, products)
    }

    fn product<'a>(products: &'a [Product], id: &amazonas_core::ProductId) -> &'a Product {
        products.iter().find(|p| &p.product_id == id).unwrap()
    }

    #[test]
    fn test_v2_cart_snapshot_matches_product() {
        let (customers, products) = sample();
        let mut rng = StdRng::seed_from_u64(7);
        let carts =
            build_carts(&customers, &products, SchemaGeneration::V2, &mut rng, now()).unwrap();

        assert_eq!(carts.len(), customers.len());
        for cart in &carts {
            assert_eq!(cart.items.len(), 1);
            let item = &cart.items[0];
            assert!(CART_QTY.contains(&item.qty));
            let source = product(&products, &item.product_id);
            let snapshot = item.product_snapshot.as_ref().unwrap();
            assert_eq!(snapshot.title, source.title);
            assert_eq!(snapshot.price_at_add, source.price);
            assert_eq!(snapshot.currency, source.currency);
        }
    }

    #[test]
    fn test_v1_cart_has_no_snapshot() {
        let (customers, products) = sample();
        let mut rng = StdRng::seed_from_u64(7);
        let carts =
            build_carts(&customers, &products, SchemaGeneration::V1, &mut rng, now()).unwrap();
        assert!(carts.iter().all(|c| c.items[0].product_snapshot.is_none()));

        let doc = bson::to_document(&carts[0]).unwrap();
        let item = doc.get_array("items").unwrap()[0].as_document().unwrap();
        assert!(!item.contains_key("product_snapshot"));
        assert!(item.get("variant").unwrap().as_null().is_some());
    }

    #[test]
    fn test_order_total_is_price_times_qty() {
        let (customers, products) = sample();
        for generation in [SchemaGeneration::V1, SchemaGeneration::V2] {
            for seed in 0..20 {
                let mut rng = StdRng::seed_from_u64(seed);
                let orders =
                    build_orders(&customers, &products, generation, &mut rng, now()).unwrap();
                for order in &orders {
                    let item = &order.items[0];
                    let source = product(&products, &item.product_id);
                    assert!(ORDER_QTY.contains(&item.qty));
                    assert_eq!(
                        order.total_amount,
                        source.price * Decimal::from(item.qty)
                    );
                    assert!(order.total_matches_items());
                }
            }
        }
    }

    #[test]
    fn test_stored_order_total_is_price_times_qty() {
        let (customers, products) = sample();
        for generation in [SchemaGeneration::V1, SchemaGeneration::V2] {
            for seed in 0..40 {
                let mut rng = StdRng::seed_from_u64(seed);
                let orders =
                    build_orders(&customers, &products, generation, &mut rng, now()).unwrap();
                for order in &orders {
                    let stored = bson::to_document(order).unwrap();
                    let total = stored.get("total_amount").unwrap();
                    assert!(matches!(total, Bson::Decimal128(_)), "{total:?}");

                    let item = stored.get_array("items").unwrap()[0].as_document().unwrap();
                    let price = match generation {
                        SchemaGeneration::V1 => item.get("unit_price").unwrap(),
                        SchemaGeneration::V2 => item
                            .get_document("product_snapshot")
                            .unwrap()
                            .get("price_at_order")
                            .unwrap(),
                    };
                    let qty = Decimal::from(order.items[0].qty);
                    assert_eq!(
                        money::from_bson(total).unwrap(),
                        money::from_bson(price).unwrap() * qty
                    );
                }
            }
        }
    }

    #[test]
    fn test_v2_order_embeds_snapshots() {
        let (customers, products) = sample();
        let mut rng = StdRng::seed_from_u64(3);
        let orders =
            build_orders(&customers, &products, SchemaGeneration::V2, &mut rng, now()).unwrap();

        for (order, customer) in orders.iter().zip(&customers) {
            assert_eq!(order.status, OrderStatus::Placed);
            let snapshot = order.customer_snapshot.as_ref().unwrap();
            assert_eq!(snapshot.email, customer.email);
            assert_eq!(snapshot.customer_id.as_ref(), Some(&customer.customer_id));
            assert_eq!(snapshot.default_address.as_ref(), customer.default_address());
            assert_eq!(order.shipping_address.as_ref(), customer.default_address());

            let item = &order.items[0];
            assert!(item.unit_price.is_none());
            let product_snapshot = item.product_snapshot.as_ref().unwrap();
            assert_eq!(
                product_snapshot.price_at_order,
                product(&products, &item.product_id).price
            );

            let summary = order.payment_summary.as_ref().unwrap();
            assert_eq!(summary.status, Some(PaymentStatus::Pending));
            assert!(summary.payment_id.is_none());
        }
    }

    #[test]
    fn test_v1_order_uses_unit_price() {
        let (customers, products) = sample();
        let mut rng = StdRng::seed_from_u64(3);
        let orders =
            build_orders(&customers, &products, SchemaGeneration::V1, &mut rng, now()).unwrap();
        for order in &orders {
            assert!(order.customer_snapshot.is_none());
            assert!(order.payment_summary.is_none());
            assert!(order.items[0].product_snapshot.is_none());
            assert!(order.items[0].unit_price.is_some());
        }
    }

    #[test]
    fn test_snapshot_survives_product_change() {
        let (customers, mut products) = sample();
        let mut rng = StdRng::seed_from_u64(11);
        let orders =
            build_orders(&customers, &products, SchemaGeneration::V2, &mut rng, now()).unwrap();
        let before: Vec<_> = orders
            .iter()
            .map(|o| o.items[0].product_snapshot.clone().unwrap())
            .collect();

        for p in &mut products {
            p.price += Decimal::ONE_HUNDRED;
            p.title.push_str(" (2026)");
        }

        for (order, snapshot) in orders.iter().zip(before) {
            assert_eq!(order.items[0].product_snapshot.as_ref(), Some(&snapshot));
            assert_ne!(
                snapshot.price_at_order,
                product(&products, &order.items[0].product_id).price
            );
        }
    }

    #[test]
    fn test_reviews_are_bounded_and_unique_per_pair() {
        let (customers, products) = sample();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reviews =
                build_reviews(&customers, &products, SchemaGeneration::V2, &mut rng, now())
                    .unwrap();
            let pairs: HashSet<_> = reviews
                .iter()
                .map(|r| (r.product_id.clone(), r.customer_id.clone()))
                .collect();
            assert_eq!(pairs.len(), reviews.len());
            for review in &reviews {
                assert!(REVIEW_STARS.contains(&review.rating.stars()));
                assert!(review.product_snapshot.is_some());
                assert!(review.customer_snapshot.is_some());
            }
        }
    }

    #[test]
    fn test_payments_cover_order_amounts() {
        let (customers, products) = sample();
        let mut rng = StdRng::seed_from_u64(5);
        let orders =
            build_orders(&customers, &products, SchemaGeneration::V2, &mut rng, now()).unwrap();
        let summaries: Vec<OrderSummary> = orders.iter().map(OrderSummary::from).collect();
        let payments = build_payments(&summaries, &mut rng, now()).unwrap();

        assert_eq!(payments.len(), orders.len());
        for (payment, order) in payments.iter().zip(&orders) {
            assert_eq!(payment.order_id, order.order_id);
            assert_eq!(payment.amount, order.total_amount);
            assert_eq!(payment.status, PaymentStatus::Authorized);
            let reference = payment.provider_ref.as_deref().unwrap();
            let digits: u32 = reference.strip_prefix("PAY-").unwrap().parse().unwrap();
            assert!(PROVIDER_REF.contains(&digits));
            assert!(INSTALLMENTS.contains(&payment.metadata.installments));
        }
    }

    #[test]
    fn test_missing_references() {
        let (customers, products) = sample();
        let mut rng = StdRng::seed_from_u64(1);

        let no_products =
            build_carts(&customers, &[], SchemaGeneration::V2, &mut rng, now()).unwrap_err();
        assert!(matches!(
            no_products,
            DbError::MissingReference {
                dependent: CollectionKind::Carts,
                collection: CollectionKind::Products
            }
        ));

        let no_customers =
            build_reviews(&[], &products, SchemaGeneration::V2, &mut rng, now()).unwrap_err();
        assert!(matches!(
            no_customers,
            DbError::MissingReference {
                collection: CollectionKind::Customers,
                ..
            }
        ));

        let no_orders = build_payments(&[], &mut rng, now()).unwrap_err();
        assert!(matches!(
            no_orders,
            DbError::MissingReference {
                collection: CollectionKind::Orders,
                ..
            }
        ));
    }
}
