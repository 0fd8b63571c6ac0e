//! `amazonas seed` and `amazonas setup` - insert sample documents.
//!
//! Customers and products come from a YAML fixture file (the built-in
//! sample unless `--fixtures` is given). Carts, orders, reviews and payments
//! are derived from what is already stored, so `--only carts` works against a
//! database seeded earlier.
//!
//! Fixtures are validated before the connection is opened, and `setup` runs
//! provisioning and seeding over that single connection.

use std::path::{Path, PathBuf};

use amazonas_core::CollectionKind;
use amazonas_db::{DbConfig, Fixtures, SeedReport, Seeder};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use super::provision;

/// What to seed and how.
#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    /// Seed a single collection instead of all of them.
    pub only: Option<CollectionKind>,
    /// Fixture file; the built-in sample when `None`.
    pub fixtures: Option<PathBuf>,
    pub rng_seed: Option<u64>,
    /// Provision the database before seeding (`setup`).
    pub provision: bool,
}

/// Seed one collection or all of them, provisioning first if asked.
///
/// # Errors
///
/// Returns an error if the fixture file cannot be read or is invalid, the
/// server is unreachable, or a provisioning command or insert fails.
pub async fn run(config: &DbConfig, options: &SeedOptions) -> Result<(), Box<dyn std::error::Error>> {
    let fixtures = load_fixtures(options.fixtures.as_deref()).await?;
    info!(
        customers = fixtures.customers.len(),
        products = fixtures.products.len(),
        "Fixtures loaded"
    );

    info!(
        generation = %config.generation,
        database = %config.database,
        host = %config.redacted_host(),
        "Connecting"
    );
    let db = amazonas_db::connect(config).await?;

    if options.provision {
        provision::apply(&db, config.generation).await?;
    }

    let rng = options
        .rng_seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut seeder = Seeder::new(db, config.generation, fixtures, rng);

    if let Some(kind) = options.only {
        let outcome = seeder.seed(kind).await?;
        info!(
            collection = %outcome.kind,
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "Seeded collection"
        );
        return Ok(());
    }

    let report = seeder.seed_all().await?;
    log_report(&report);
    Ok(())
}

async fn load_fixtures(path: Option<&Path>) -> Result<Fixtures, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Fixtures::builtin()?);
    };
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    info!(path = %path.display(), "Loading fixtures from file");
    let content = tokio::fs::read_to_string(path).await?;
    Ok(Fixtures::from_yaml(&content)?)
}

fn log_report(report: &SeedReport) {
    for outcome in &report.collections {
        info!(
            collection = %outcome.kind,
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "Seeded collection"
        );
    }
    info!(
        generation = %report.generation,
        inserted = report.inserted(),
        skipped = report.skipped(),
        "Seeding complete!"
    );
}
