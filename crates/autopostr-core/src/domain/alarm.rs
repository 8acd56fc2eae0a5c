use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Entity, PostRef};
use crate::error::PlannerError;

/// Alarms only ever move from `Active` to `Dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmStatus {
    #[default]
    Active,
    Dismissed,
}

impl AlarmStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmStatus::Active => "active",
            AlarmStatus::Dismissed => "dismissed",
        }
    }
}

impl FromStr for AlarmStatus {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AlarmStatus::Active),
            "dismissed" => Ok(AlarmStatus::Dismissed),
            other => Err(PlannerError::Validation(format!(
                "unknown alarm status '{other}'"
            ))),
        }
    }
}

/// Alarm entity - a reminder, optionally linked to one scheduled or planned post.
///
/// At most one of `scheduled_post_id` / `planned_post_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub alarm_datetime: DateTime<Utc>,
    pub scheduled_post_id: Option<Uuid>,
    pub planned_post_id: Option<Uuid>,
    pub sound_enabled: bool,
    pub notification_enabled: bool,
    pub notes: String,
    pub status: AlarmStatus,
    pub created_at: DateTime<Utc>,
}

/// Alarm creation request as submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlarm {
    pub title: String,
    pub alarm_datetime: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_post_id: Option<Uuid>,
    #[serde(default)]
    pub planned_post_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub notification_enabled: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_true() -> bool {
    true
}

impl Alarm {
    /// The post this alarm points at, if any.
    pub fn link(&self) -> Option<PostRef> {
        match (self.scheduled_post_id, self.planned_post_id) {
            (Some(id), _) => Some(PostRef::scheduled(id)),
            (None, Some(id)) => Some(PostRef::planned(id)),
            (None, None) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AlarmStatus::Active
    }

    /// Dismiss the alarm. Returns `false` when it was already dismissed.
    pub fn dismiss(&mut self) -> bool {
        if self.status == AlarmStatus::Dismissed {
            return false;
        }
        self.status = AlarmStatus::Dismissed;
        true
    }
}

impl Entity for Alarm {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }
}
