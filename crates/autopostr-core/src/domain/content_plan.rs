use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Entity, Frequency};
use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
            PlanStatus::Archived => "archived",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PlanStatus::Active),
            "completed" => Ok(PlanStatus::Completed),
            "archived" => Ok(PlanStatus::Archived),
            other => Err(PlannerError::Validation(format!(
                "unknown content plan status '{other}'"
            ))),
        }
    }
}

/// ContentPlan entity - a named batch of planned posts over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand_profile_id: Option<Uuid>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: Frequency,
    /// Number of planned posts generated for this plan.
    pub total_posts: i32,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
}

impl ContentPlan {
    /// Create a new active plan with a generated ID.
    pub fn new(
        user_id: Uuid,
        brand_profile_id: Option<Uuid>,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
        total_posts: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            brand_profile_id,
            name,
            start_date,
            end_date,
            frequency,
            total_posts: i32::try_from(total_posts).unwrap_or(i32::MAX),
            status: PlanStatus::Active,
            created_at: Utc::now(),
        }
    }
}

impl Entity for ContentPlan {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }
}
