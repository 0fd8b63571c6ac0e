//! Subcommand implementations.

pub mod provision;
pub mod schema;
pub mod seed;

use amazonas_core::SchemaGeneration;
use amazonas_db::{ConfigError, DbConfig};

/// Database selection shared by every command that connects.
#[derive(Debug, Clone)]
pub struct Target {
    pub generation: SchemaGeneration,
    /// `--database` flag, which wins over `MONGO_DB`.
    pub database: Option<String>,
}

impl Target {
    /// Load `DbConfig` from the environment and apply the CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable is invalid.
    pub fn config(&self) -> Result<DbConfig, ConfigError> {
        let config = DbConfig::from_env(self.generation)?;
        Ok(match &self.database {
            Some(database) => config.with_database(database.clone()),
            None => config,
        })
    }
}
