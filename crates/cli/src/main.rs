//! Amazonas CLI - MongoDB schema provisioning and sample data.
//!
//! # Usage
//!
//! ```bash
//! # Create collections, validators and indexes (schema v2)
//! amazonas provision
//!
//! # Same for the normalized v1 schema in a custom database
//! amazonas --generation v1 --database shop-v1 provision
//!
//! # Seed every collection, or only one
//! amazonas seed
//! amazonas seed --only reviews
//!
//! # Provision then seed, with a reproducible random stream
//! amazonas setup --rng-seed 42
//!
//! # Print the validator and indexes of a collection
//! amazonas schema orders
//! ```
//!
//! # Commands
//!
//! - `provision` - Create collections and apply validators and indexes
//! - `seed` - Insert sample documents
//! - `setup` - `provision` followed by `seed` over one connection
//! - `schema` - Print a collection definition as Extended JSON
//!
//! # Environment Variables
//!
//! - `MONGO_URI` - MongoDB connection string
//! - `MONGO_DB` - Target database (overridden by `--database`)
//! - `RUST_LOG` - Log filter (default: `amazonas_db=info,amazonas_cli=info`)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use amazonas_core::{CollectionKind, SchemaGeneration};
use clap::{Parser, Subcommand};
use commands::seed::SeedOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "amazonas")]
#[command(author, version, about = "Amazonas MongoDB provisioning and seeding")]
struct Cli {
    /// Schema generation (`v1` normalized, `v2` denormalized)
    #[arg(short, long, global = true, default_value_t = SchemaGeneration::V2)]
    generation: SchemaGeneration,

    /// Target database (overrides `MONGO_DB`)
    #[arg(short, long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create collections and apply validators and indexes
    Provision,
    /// Insert sample documents into a provisioned database
    Seed {
        /// Seed only this collection (its references must already exist)
        #[arg(long)]
        only: Option<CollectionKind>,

        #[command(flatten)]
        seed: SeedArgs,
    },
    /// Provision, then seed every collection
    Setup {
        #[command(flatten)]
        seed: SeedArgs,
    },
    /// Print a collection's validator and indexes as Extended JSON
    Schema {
        /// Collection name (customers, products, carts, orders, reviews, payments)
        kind: CollectionKind,
    },
}

#[derive(clap::Args)]
struct SeedArgs {
    /// YAML file with customers and products (default: built-in sample)
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Seed for the random stream, for reproducible quantities and ratings
    #[arg(long)]
    rng_seed: Option<u64>,
}

impl SeedArgs {
    fn into_options(self, only: Option<CollectionKind>, provision: bool) -> SeedOptions {
        SeedOptions {
            only,
            fixtures: self.fixtures,
            rng_seed: self.rng_seed,
            provision,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "amazonas_db=info,amazonas_cli=info".into());

    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let target = commands::Target {
        generation: cli.generation,
        database: cli.database,
    };
    match cli.command {
        Commands::Provision => {
            commands::provision::run(&target).await?;
        }
        Commands::Seed { only, seed } => {
            let options = seed.into_options(only, false);
            commands::seed::run(&target.config()?, &options).await?;
        }
        Commands::Setup { seed } => {
            let options = seed.into_options(None, true);
            commands::seed::run(&target.config()?, &options).await?;
        }
        Commands::Schema { kind } => commands::schema::print(kind, cli.generation)?,
    }
    Ok(())
}
