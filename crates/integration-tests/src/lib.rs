//! Integration tests for Amazonas.
//!
//! # Running Tests
//!
//! ```bash
//! # Start MongoDB (credentials match the default MONGO_URI)
//! docker run -d -p 27017:27017 \
//!   -e MONGO_INITDB_ROOT_USERNAME=admin -e MONGO_INITDB_ROOT_PASSWORD=admin123 mongo:7
//!
//! # Run the ignored live tests
//! cargo test -p amazonas-integration-tests -- --ignored
//! ```
//!
//! Each test works in its own `amazonas-test-<uuid>` database, dropped by
//! [`TestContext::cleanup`].

use amazonas_core::{CollectionKind, SchemaGeneration};
use amazonas_db::{DbConfig, DbResult, Fixtures, Provisioner, Seeder};
use futures::TryStreamExt;
use mongodb::Database;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::de::DeserializeOwned;

/// Seed used for every test seeder so failures reproduce.
pub const RNG_SEED: u64 = 7;

/// A throwaway database on the server named by `MONGO_URI`.
pub struct TestContext {
    pub db: Database,
    pub generation: SchemaGeneration,
}

impl TestContext {
    /// Connect and select a fresh, uniquely named database.
    ///
    /// # Errors
    ///
    /// Returns an error if `MONGO_URI` is invalid or the server is down.
    pub async fn new(generation: SchemaGeneration) -> DbResult<Self> {
        dotenvy::dotenv().ok();
        let database = format!("amazonas-test-{}", uuid::Uuid::new_v4().simple());
        let config = DbConfig::from_env(generation)?.with_database(database);
        let db = amazonas_db::connect(&config).await?;
        Ok(Self { db, generation })
    }

    /// Provision every collection.
    ///
    /// # Errors
    ///
    /// Propagates provisioning failures.
    pub async fn provision(&self) -> DbResult<amazonas_db::ProvisionReport> {
        Provisioner::new(self.db.clone())
            .provision(self.generation)
            .await
    }

    /// Seeder over the built-in fixtures with a fixed random seed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in fixtures are invalid.
    pub fn seeder(&self) -> DbResult<Seeder<StdRng>> {
        Ok(self.seeder_with(Fixtures::builtin()?))
    }

    /// Seeder over `fixtures` with a fixed random seed.
    #[must_use]
    pub fn seeder_with(&self, fixtures: Fixtures) -> Seeder<StdRng> {
        Seeder::new(
            self.db.clone(),
            self.generation,
            fixtures,
            StdRng::seed_from_u64(RNG_SEED),
        )
    }

    /// Every document of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a document does not match `T`.
    pub async fn all<T>(&self, kind: CollectionKind) -> DbResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let documents = self
            .db
            .collection::<T>(kind.name())
            .find(bson::doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(documents)
    }

    /// Number of documents in `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the count fails.
    pub async fn count(&self, kind: CollectionKind) -> DbResult<u64> {
        Ok(self
            .db
            .collection::<bson::Document>(kind.name())
            .count_documents(bson::doc! {})
            .await?)
    }

    /// Drop the test database.
    ///
    /// # Errors
    ///
    /// Returns an error if the drop command fails.
    pub async fn cleanup(self) -> DbResult<()> {
        self.db.drop().await?;
        Ok(())
    }
}
