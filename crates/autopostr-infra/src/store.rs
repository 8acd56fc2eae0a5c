//! Store selection from configuration.

use autopostr_core::error::RepoError;
use autopostr_core::ports::PlannerStore;

use crate::config::PlannerConfig;
use crate::memory::in_memory_store;

/// Open the store `config` describes: PostgreSQL when a database is
/// configured, process memory otherwise.
pub async fn open_store(config: &PlannerConfig) -> Result<PlannerStore, RepoError> {
    match &config.database {
        #[cfg(feature = "postgres")]
        Some(database) => {
            let connections = crate::database::DatabaseConnections::init(database)
                .await
                .map_err(|e| RepoError::Connection(e.to_string()))?;
            Ok(crate::database::postgres_store(connections.main))
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => {
            tracing::warn!(
                "DATABASE_URL is set but the postgres feature is disabled, using in-memory store"
            );
            Ok(in_memory_store())
        }
        None => {
            tracing::info!("No database configured, using in-memory store");
            Ok(in_memory_store())
        }
    }
}
