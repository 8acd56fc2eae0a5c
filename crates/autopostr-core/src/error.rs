//! Domain-level error types.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Planner errors - invalid requests and store failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid frequency: {0} (expected weekly, biweekly or monthly)")]
    InvalidFrequency(String),

    #[error("Invalid count: {0} (must be at least 1)")]
    InvalidCount(i64),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Date out of supported range")]
    DateOutOfRange,

    #[error("Alarm cannot link both a scheduled and a planned post")]
    AmbiguousLink,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Persistence error: {0}")]
    Persistence(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
