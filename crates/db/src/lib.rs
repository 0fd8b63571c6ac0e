//! Amazonas DB - MongoDB provisioning and sample data.
//!
//! # Architecture
//!
//! ```text
//! schema (validators + indexes) --> Provisioner --> MongoDB
//! fixtures (YAML) --> Seeder --> builders (carts/orders/reviews/payments) --> MongoDB
//! ```
//!
//! # Modules
//!
//! - [`config`] - Connection settings from environment variables
//! - [`models`] - Stored document shapes for both schema generations
//! - [`schema`] - `$jsonSchema` validators and index definitions
//! - [`provision`] - Idempotent collection, validator and index setup
//! - [`seed`] - Sample customers, products and derived documents

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod provision;
pub mod schema;
pub mod seed;

use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use tracing::{info, instrument};

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use provision::{ProvisionReport, Provisioner};
pub use schema::CollectionSchema;
pub use seed::{Fixtures, SeedReport, Seeder};

/// Application name reported to the server in the connection handshake.
pub const APP_NAME: &str = "amazonas";

/// Connect to MongoDB and return a handle to the configured database.
///
/// The driver connects lazily, so a `ping` is issued to surface bad
/// credentials or an unreachable server before any work starts.
///
/// # Errors
///
/// Returns `DbError::Mongo` if the connection string is invalid or the
/// server does not answer the ping.
#[instrument(skip(config), fields(host = %config.redacted_host(), database = %config.database))]
pub async fn connect(config: &DbConfig) -> DbResult<Database> {
    let mut options = ClientOptions::parse(config.uri.expose_secret()).await?;
    options.app_name = Some(APP_NAME.to_owned());

    let client = Client::with_options(options)?;
    let db = client.database(&config.database);
    db.run_command(bson::doc! { "ping": 1 }).await?;

    info!("Connected to MongoDB");
    Ok(db)
}
