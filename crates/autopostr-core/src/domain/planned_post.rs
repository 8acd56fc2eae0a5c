use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates::{format_date, format_time, parse_date, parse_time};
use super::{Entity, ordered_set};
use crate::error::PlannerError;

/// Review state of a planned post. The planner only ever emits `Suggested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannedStatus {
    #[default]
    Suggested,
    Accepted,
    Rejected,
}

impl PlannedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlannedStatus::Suggested => "suggested",
            PlannedStatus::Accepted => "accepted",
            PlannedStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for PlannedStatus {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suggested" => Ok(PlannedStatus::Suggested),
            "accepted" => Ok(PlannedStatus::Accepted),
            "rejected" => Ok(PlannedStatus::Rejected),
            other => Err(PlannerError::Validation(format!(
                "unknown planned post status '{other}'"
            ))),
        }
    }
}

/// PlannedPost entity - a suggestion belonging to a content plan.
///
/// Planned posts carry no timezone: `suggested_date` is a naive local date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPost {
    pub id: Uuid,
    pub content_plan_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub suggested_date: String,
    pub suggested_time: String,
    pub rationale: String,
    pub platforms: Vec<String>,
    pub status: PlannedStatus,
    /// Zero-based position in the generating plan.
    pub order_in_plan: i32,
    pub created_at: DateTime<Utc>,
}

/// A planned post as produced by the plan expander, before it belongs to a
/// persisted plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPostDraft {
    pub title: String,
    pub rationale: String,
    pub suggested_date: NaiveDate,
    pub suggested_time: NaiveTime,
    pub platforms: Vec<String>,
    pub order_in_plan: usize,
}

impl PlannedPostDraft {
    /// Attach the draft to a stored content plan.
    pub fn into_planned_post(self, content_plan_id: Uuid, user_id: Uuid) -> PlannedPost {
        PlannedPost {
            id: Uuid::new_v4(),
            content_plan_id,
            user_id,
            title: self.title,
            suggested_date: format_date(self.suggested_date),
            suggested_time: format_time(self.suggested_time),
            rationale: self.rationale,
            platforms: ordered_set(self.platforms),
            status: PlannedStatus::Suggested,
            order_in_plan: i32::try_from(self.order_in_plan).unwrap_or(i32::MAX),
            created_at: Utc::now(),
        }
    }
}

impl PlannedPost {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.suggested_date)
    }

    pub fn time(&self) -> Option<NaiveTime> {
        parse_time(&self.suggested_time)
    }

    pub fn set_platforms(&mut self, platforms: Vec<String>) {
        self.platforms = ordered_set(platforms);
    }
}

impl Entity for PlannedPost {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }
}
