//! Ports - trait definitions for the external store.
//! These are the "interfaces" that infrastructure must implement.

mod repository;

pub use repository::{
    AlarmRepository, BaseRepository, ContentPlanRepository, PlannedPostRepository, PlannerStore,
    ScheduledPostRepository,
};
