//! Schema and index provisioning.
//!
//! For each collection: create it when missing, attach its validator with
//! `collMod`, then ensure its indexes. Every step is idempotent, so running
//! the provisioner twice leaves the database in the same state. There is no
//! rollback; the first failing command aborts the run.

use amazonas_core::{CollectionKind, SchemaGeneration};
use bson::{Document, doc};
use mongodb::Database;
use tracing::{info, instrument};

use crate::error::DbResult;
use crate::schema::{CollectionSchema, IndexSpec};

/// Validation level attached to every collection.
///
/// `moderate` checks inserts and updates to documents that already pass the
/// validator; pre-existing non-conforming documents are left alone.
pub const VALIDATION_LEVEL: &str = "moderate";

/// What `ensure_collection` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    Created,
    AlreadyExisted,
}

/// Per-collection result of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedCollection {
    pub kind: CollectionKind,
    pub outcome: CollectionOutcome,
    pub indexes: Vec<String>,
}

/// Result of [`Provisioner::provision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub generation: SchemaGeneration,
    pub collections: Vec<ProvisionedCollection>,
}

impl ProvisionReport {
    /// Number of collections created by this run.
    #[must_use]
    pub fn created(&self) -> usize {
        self.collections
            .iter()
            .filter(|c| c.outcome == CollectionOutcome::Created)
            .count()
    }
}

/// Applies collection definitions to a database.
#[derive(Debug, Clone)]
pub struct Provisioner {
    db: Database,
}

impl Provisioner {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create `kind` when missing and (re)attach `validator`.
    ///
    /// # Errors
    ///
    /// Returns an error if listing, creating or modifying the collection fails.
    #[instrument(skip(self, validator), fields(collection = %kind))]
    pub async fn ensure_collection(
        &self,
        kind: CollectionKind,
        validator: Document,
    ) -> DbResult<CollectionOutcome> {
        let existing = self.db.list_collection_names().await?;
        let outcome = if existing.iter().any(|name| name == kind.name()) {
            info!("Collection already exists");
            CollectionOutcome::AlreadyExisted
        } else {
            self.db.create_collection(kind.name()).await?;
            info!("Collection created");
            CollectionOutcome::Created
        };

        self.db.run_command(coll_mod_command(kind, validator)).await?;
        info!(level = VALIDATION_LEVEL, "Validator applied");

        Ok(outcome)
    }

    /// Create every index in `indexes` on `kind`, returning their names.
    ///
    /// # Errors
    ///
    /// Returns an error if an index with the same name but a different
    /// definition exists, or the command fails.
    #[instrument(skip(self, indexes), fields(collection = %kind, count = indexes.len()))]
    pub async fn ensure_indexes(
        &self,
        kind: CollectionKind,
        indexes: &[IndexSpec],
    ) -> DbResult<Vec<String>> {
        if indexes.is_empty() {
            return Ok(Vec::new());
        }
        let result = self
            .db
            .collection::<Document>(kind.name())
            .create_indexes(indexes.iter().map(IndexSpec::to_model))
            .await?;
        info!(indexes = ?result.index_names, "Indexes ensured");
        Ok(result.index_names)
    }

    /// Provision all six collections for `generation`.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failing command.
    #[instrument(skip(self), fields(database = %self.db.name()))]
    pub async fn provision(&self, generation: SchemaGeneration) -> DbResult<ProvisionReport> {
        let mut collections = Vec::with_capacity(CollectionKind::ALL.len());
        for schema in CollectionSchema::all(generation) {
            let outcome = self.ensure_collection(schema.kind, schema.validator).await?;
            let indexes = self.ensure_indexes(schema.kind, schema.indexes).await?;
            collections.push(ProvisionedCollection {
                kind: schema.kind,
                outcome,
                indexes,
            });
        }

        let report = ProvisionReport {
            generation,
            collections,
        };
        info!(
            %generation,
            created = report.created(),
            collections = report.collections.len(),
            "Provisioning complete"
        );
        Ok(report)
    }
}

/// `collMod` command attaching `validator` to `kind`.
#[must_use]
pub fn coll_mod_command(kind: CollectionKind, validator: Document) -> Document {
    doc! {
        "collMod": kind.name(),
        "validator": { "$jsonSchema": validator },
        "validationLevel": VALIDATION_LEVEL,
    }
}
