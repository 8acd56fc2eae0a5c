//! Domain entities - the records the planner reads, produces and links.

mod alarm;
mod brand;
mod content_plan;
mod dates;
mod frequency;
mod kind;
mod planned_post;
mod scheduled_post;
mod settings;

pub use alarm::{Alarm, AlarmStatus, NewAlarm};
pub use brand::{BrandContext, Tone};
pub use content_plan::{ContentPlan, PlanStatus};
pub use dates::{format_date, format_time, parse_date, parse_time};
pub use frequency::Frequency;
pub use kind::{PostKind, PostRef};
pub use planned_post::{PlannedPost, PlannedPostDraft, PlannedStatus};
pub use scheduled_post::{ScheduledPost, ScheduledPostDraft, ScheduledStatus};
pub use settings::PlannerSettings;

use uuid::Uuid;

/// A persisted record owned by a single user.
pub trait Entity {
    fn id(&self) -> Uuid;
    fn user_id(&self) -> Uuid;
}

/// Trim, lowercase and de-duplicate identifiers while keeping their first-seen order.
pub(crate) fn ordered_set<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let value = item.as_ref().trim().to_lowercase();
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
