//! Sample data seeding.
//!
//! Collections are populated in dependency order: customers and products
//! first, then carts, orders and reviews (which read the seeded customers and
//! products back to build snapshots and totals), then payments (which read
//! the orders). Nothing is transactional; a failure part-way leaves the
//! downstream collections unseeded.
//!
//! Reviews are inserted unordered, so a (product, customer) pair that already
//! has a review is rejected by the unique index without blocking the rest.
//! Those duplicate-key rejections are logged as a warning and skipped; every
//! other error is returned.

pub mod builders;
pub mod fixtures;

use amazonas_core::{CollectionKind, SchemaGeneration};
use bson::{DateTime, Document, doc};
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::error::ErrorKind;
use mongodb::options::FindOptions;
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::error::{DbError, DbResult};
use crate::models::{Customer, OrderSummary, Product, Review};

pub use builders::{build_carts, build_orders, build_payments, build_reviews};
pub use fixtures::{CustomerFixture, FixtureError, Fixtures, ProductFixture};

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY: i32 = 11000;

/// Documents written to one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    pub kind: CollectionKind,
    pub inserted: usize,
    /// Documents rejected as duplicates (reviews only).
    pub skipped: usize,
}

/// Result of [`Seeder::seed_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub generation: SchemaGeneration,
    pub collections: Vec<SeedOutcome>,
}

impl SeedReport {
    /// Total documents inserted across collections.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.collections.iter().map(|c| c.inserted).sum()
    }

    /// Total duplicates skipped across collections.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.collections.iter().map(|c| c.skipped).sum()
    }
}

/// Populates a provisioned database with sample documents.
#[derive(Debug)]
pub struct Seeder<R> {
    db: Database,
    generation: SchemaGeneration,
    fixtures: Fixtures,
    rng: R,
}

impl<R: Rng + Send> Seeder<R> {
    #[must_use]
    pub const fn new(
        db: Database,
        generation: SchemaGeneration,
        fixtures: Fixtures,
        rng: R,
    ) -> Self {
        Self {
            db,
            generation,
            fixtures,
            rng,
        }
    }

    /// Seed every collection in dependency order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error; collections seeded before it
    /// keep their documents.
    #[instrument(skip(self), fields(database = %self.db.name(), generation = %self.generation))]
    pub async fn seed_all(&mut self) -> DbResult<SeedReport> {
        let mut collections = Vec::with_capacity(CollectionKind::ALL.len());
        for kind in CollectionKind::ALL {
            collections.push(self.seed(kind).await?);
        }

        let report = SeedReport {
            generation: self.generation,
            collections,
        };
        info!(
            inserted = report.inserted(),
            skipped = report.skipped(),
            "Seeding complete"
        );
        Ok(report)
    }

    /// Seed a single collection, reading its dependencies from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced collection is empty or a database
    /// command fails.
    pub async fn seed(&mut self, kind: CollectionKind) -> DbResult<SeedOutcome> {
        let mut empty = Vec::new();
        for &dependency in kind.dependencies() {
            if self.is_empty(dependency).await? {
                empty.push(dependency);
            }
        }
        check_dependencies(kind, &empty)?;

        let (inserted, skipped) = match kind {
            CollectionKind::Customers => (self.seed_customers().await?, 0),
            CollectionKind::Products => (self.seed_products().await?, 0),
            CollectionKind::Carts => (self.seed_carts().await?, 0),
            CollectionKind::Orders => (self.seed_orders().await?, 0),
            CollectionKind::Reviews => self.seed_reviews().await?,
            CollectionKind::Payments => (self.seed_payments().await?, 0),
        };
        Ok(SeedOutcome {
            kind,
            inserted,
            skipped,
        })
    }

    /// Insert the fixture customers with fresh ids.
    ///
    /// # Errors
    ///
    /// Fails on duplicate emails left over from a previous run.
    #[instrument(skip(self))]
    pub async fn seed_customers(&mut self) -> DbResult<usize> {
        let now = DateTime::now();
        let customers: Vec<Customer> = self
            .fixtures
            .customers
            .iter()
            .cloned()
            .map(|fixture| fixture.into_customer(now))
            .collect();
        self.insert(CollectionKind::Customers, &customers).await
    }

    /// Insert the fixture products.
    ///
    /// # Errors
    ///
    /// Fails on SKUs left over from a previous run.
    #[instrument(skip(self))]
    pub async fn seed_products(&mut self) -> DbResult<usize> {
        let now = DateTime::now();
        let products: Vec<Product> = self
            .fixtures
            .products
            .iter()
            .cloned()
            .map(|fixture| fixture.into_product(now))
            .collect();
        for product in &products {
            debug!(
                product_id = %product.product_id,
                price = %product.unit_price().display(),
                "Prepared product"
            );
        }
        self.insert(CollectionKind::Products, &products).await
    }

    /// One cart per seeded customer.
    ///
    /// # Errors
    ///
    /// Fails if customers or products are missing, or a customer already has
    /// a cart.
    #[instrument(skip(self))]
    pub async fn seed_carts(&mut self) -> DbResult<usize> {
        let customers: Vec<Customer> = self.load(CollectionKind::Customers, None).await?;
        let products: Vec<Product> = self.load(CollectionKind::Products, None).await?;
        let carts = build_carts(
            &customers,
            &products,
            self.generation,
            &mut self.rng,
            DateTime::now(),
        )?;
        self.insert(CollectionKind::Carts, &carts).await
    }

    /// One order per seeded customer.
    ///
    /// # Errors
    ///
    /// Fails if customers or products are missing.
    #[instrument(skip(self))]
    pub async fn seed_orders(&mut self) -> DbResult<usize> {
        let customers: Vec<Customer> = self.load(CollectionKind::Customers, None).await?;
        let products: Vec<Product> = self.load(CollectionKind::Products, None).await?;
        let orders = build_orders(
            &customers,
            &products,
            self.generation,
            &mut self.rng,
            DateTime::now(),
        )?;
        self.insert(CollectionKind::Orders, &orders).await
    }

    /// One review per seeded customer; returns `(inserted, skipped)`.
    ///
    /// # Errors
    ///
    /// Fails if customers or products are missing, or the insert fails for
    /// any reason other than duplicate (product, customer) pairs.
    #[instrument(skip(self))]
    pub async fn seed_reviews(&mut self) -> DbResult<(usize, usize)> {
        let customers: Vec<Customer> = self.load(CollectionKind::Customers, None).await?;
        let products: Vec<Product> = self.load(CollectionKind::Products, None).await?;
        let reviews = build_reviews(
            &customers,
            &products,
            self.generation,
            &mut self.rng,
            DateTime::now(),
        )?;

        let result = self
            .db
            .collection::<Review>(CollectionKind::Reviews.name())
            .insert_many(&reviews)
            .ordered(false)
            .await;

        match result {
            Ok(result) => {
                let inserted = result.inserted_ids.len();
                info!(collection = "reviews", inserted, "Inserted documents");
                Ok((inserted, 0))
            }
            Err(error) => {
                let Some(skipped) = rejected_duplicates(&error) else {
                    return Err(error.into());
                };
                let inserted = reviews.len().saturating_sub(skipped);
                warn!(
                    collection = "reviews",
                    inserted,
                    skipped,
                    error = %error,
                    "Duplicate reviews ignored"
                );
                Ok((inserted, skipped))
            }
        }
    }

    /// One payment per seeded order.
    ///
    /// # Errors
    ///
    /// Fails if there are no orders.
    #[instrument(skip(self))]
    pub async fn seed_payments(&mut self) -> DbResult<usize> {
        let projection = doc! { "_id": 0, "order_id": 1, "total_amount": 1, "currency": 1 };
        let orders: Vec<OrderSummary> = self
            .load(CollectionKind::Orders, Some(projection))
            .await?;
        let payments = build_payments(&orders, &mut self.rng, DateTime::now())?;
        self.insert(CollectionKind::Payments, &payments).await
    }

    async fn is_empty(&self, kind: CollectionKind) -> DbResult<bool> {
        let first = self
            .db
            .collection::<Document>(kind.name())
            .find_one(doc! {})
            .await?;
        Ok(first.is_none())
    }

    async fn load<T>(&self, kind: CollectionKind, projection: Option<Document>) -> DbResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .projection(projection)
            .build();
        let documents: Vec<T> = self
            .db
            .collection::<T>(kind.name())
            .find(doc! {})
            .with_options(options)
            .await?
            .try_collect()
            .await?;
        Ok(documents)
    }

    async fn insert<T>(&self, kind: CollectionKind, documents: &[T]) -> DbResult<usize>
    where
        T: Serialize + Send + Sync,
    {
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self
            .db
            .collection::<T>(kind.name())
            .insert_many(documents)
            .await?;
        let inserted = result.inserted_ids.len();
        info!(collection = %kind, inserted, "Inserted documents");
        Ok(inserted)
    }
}

/// Fail with the first dependency of `kind` (in declaration order) found in
/// `empty`.
///
/// # Errors
///
/// Returns [`DbError::MissingReference`] naming that dependency.
pub fn check_dependencies(kind: CollectionKind, empty: &[CollectionKind]) -> DbResult<()> {
    match kind
        .dependencies()
        .iter()
        .find(|dependency| empty.contains(dependency))
    {
        Some(&collection) => Err(DbError::MissingReference {
            dependent: kind,
            collection,
        }),
        None => Ok(()),
    }
}

/// Number of documents an unordered insert rejected, if every rejection was
/// a duplicate key and there was no write concern failure.
#[must_use]
pub fn rejected_duplicates(error: &mongodb::error::Error) -> Option<usize> {
    let ErrorKind::InsertMany(failure) = error.kind.as_ref() else {
        return None;
    };
    if failure.write_concern_error.is_some() {
        return None;
    }
    let codes: Vec<i32> = failure
        .write_errors
        .as_ref()?
        .iter()
        .map(|write_error| write_error.code)
        .collect();
    only_duplicate_keys(&codes).then_some(codes.len())
}

/// Whether `codes` is non-empty and consists solely of duplicate-key errors.
#[must_use]
pub fn only_duplicate_keys(codes: &[i32]) -> bool {
    !codes.is_empty() && codes.iter().all(|&code| code == DUPLICATE_KEY)
}
