//! Error types for provisioning and seeding.

use amazonas_core::CollectionKind;
use thiserror::Error;

use crate::config::ConfigError;
use crate::seed::FixtureError;

/// Errors that can occur while talking to the database.
#[derive(Debug, Error)]
pub enum DbError {
    /// Command or connection error from the MongoDB driver.
    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A dependent collection was seeded before the one it references.
    #[error("cannot seed {dependent}: collection {collection} is empty")]
    MissingReference {
        /// Collection being seeded.
        dependent: CollectionKind,
        /// Referenced collection that has no documents.
        collection: CollectionKind,
    },

    /// Connection settings are invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sample data could not be loaded.
    #[error("fixture error: {0}")]
    Fixtures(#[from] FixtureError),
}

/// Result alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
