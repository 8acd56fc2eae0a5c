//! # Autopostr Infrastructure
//!
//! Concrete implementations of the store ports defined in `autopostr-core`,
//! plus environment configuration and tracing setup.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod config;
pub mod database;
pub mod memory;
pub mod store;
pub mod telemetry;

// Re-exports - In-Memory
pub use config::PlannerConfig;
pub use database::DatabaseConfig;
pub use memory::{InMemoryRepository, in_memory_store};
pub use store::open_store;
pub use telemetry::{TelemetryConfig, init_telemetry};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, postgres_store};
