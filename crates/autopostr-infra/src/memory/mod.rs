//! In-memory store - used when no database is configured, and in tests.

mod repository;


use std::sync::Arc;

use autopostr_core::domain::{Alarm, ContentPlan, PlannedPost, ScheduledPost};
use autopostr_core::ports::PlannerStore;

pub use repository::InMemoryRepository;

/// Build a store whose four collections live in process memory.
///
/// Note: Data is lost on process restart.
pub fn in_memory_store() -> PlannerStore {
    PlannerStore {
        scheduled_posts: Arc::new(InMemoryRepository::<ScheduledPost>::new()),
        planned_posts: Arc::new(InMemoryRepository::<PlannedPost>::new()),
        content_plans: Arc::new(InMemoryRepository::<ContentPlan>::new()),
        alarms: Arc::new(InMemoryRepository::<Alarm>::new()),
    }
}
