//! `amazonas provision` - create collections, validators and indexes.

use amazonas_core::SchemaGeneration;
use amazonas_db::{ProvisionReport, Provisioner};
use mongodb::Database;
use tracing::info;

use super::Target;

/// Connect to the target database and provision every collection.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the server is unreachable,
/// or any provisioning command fails.
pub async fn run(target: &Target) -> Result<ProvisionReport, Box<dyn std::error::Error>> {
    let config = target.config()?;
    info!(
        generation = %config.generation,
        database = %config.database,
        host = %config.redacted_host(),
        "Provisioning database"
    );

    let db = amazonas_db::connect(&config).await?;
    apply(&db, config.generation).await
}

/// Provision every collection of `generation` over an open connection.
///
/// # Errors
///
/// Returns an error if any provisioning command fails.
pub async fn apply(
    db: &Database,
    generation: SchemaGeneration,
) -> Result<ProvisionReport, Box<dyn std::error::Error>> {
    let report = Provisioner::new(db.clone()).provision(generation).await?;

    for collection in &report.collections {
        info!(
            collection = %collection.kind,
            outcome = ?collection.outcome,
            indexes = collection.indexes.len(),
            "Collection ready"
        );
    }
    Ok(report)
}
