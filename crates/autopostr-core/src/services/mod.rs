//! Planning services - the pure engine components and the session that
//! drives them against the store.

pub mod alarms;
pub mod calendar;
pub mod content_planner;
pub mod recurrence;
mod requests;
mod session;

pub use alarms::{AlarmTarget, create_alarm, due, resolve_target, upcoming};
pub use calendar::{Calendar, CalendarItem};
pub use content_planner::{PlanExpansion, PlanRequest, expand_plan};
pub use recurrence::{Occurrences, RecurrenceRule, generate_recurring_schedule};
pub use requests::{
    ContentPlanRequest, PlannedPostUpdate, PostContent, SchedulePostRequest, ScheduledPostUpdate,
    SmartScheduleRequest,
};
pub use session::{Modals, PlanOutcome, PlannerSession, ViewMode, ViewState};
