//! Database connection management and the SeaORM store.

mod connections;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresAlarmRepository, PostgresContentPlanRepository, PostgresPlannedPostRepository,
    PostgresScheduledPostRepository,
};

#[cfg(feature = "postgres")]
use std::sync::Arc;

#[cfg(feature = "postgres")]
use autopostr_core::ports::PlannerStore;

/// Build a store whose four collections live in PostgreSQL.
#[cfg(feature = "postgres")]
pub fn postgres_store(db: sea_orm::DbConn) -> PlannerStore {
    let db = Arc::new(db);
    PlannerStore {
        scheduled_posts: Arc::new(PostgresScheduledPostRepository::shared(Arc::clone(&db))),
        planned_posts: Arc::new(PostgresPlannedPostRepository::shared(Arc::clone(&db))),
        content_plans: Arc::new(PostgresContentPlanRepository::shared(Arc::clone(&db))),
        alarms: Arc::new(PostgresAlarmRepository::shared(db)),
    }
}

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
