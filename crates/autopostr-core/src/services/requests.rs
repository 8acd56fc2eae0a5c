//! Inputs the collaborator UI submits to the planner session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PlannedStatus, ScheduledStatus};

/// Schedule the current content for a specific day and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePostRequest {
    pub title: String,
    pub scheduled_date: NaiveDate,
    /// `HH:MM`
    pub scheduled_time: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// The generated content a scheduled post carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Generate a recurring run of draft posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartScheduleRequest {
    pub frequency: String,
    #[serde(default)]
    pub preferred_day: String,
    /// `HH:MM`
    pub preferred_time: String,
    pub number_of_posts: i64,
    pub start_date: NaiveDate,
}

/// Generate and store a content plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlanRequest {
    pub plan_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: String,
    #[serde(default)]
    pub preferred_day: Option<String>,
    pub number_of_posts: i64,
    /// `HH:MM`; rotates through the configured slots when absent.
    #[serde(default)]
    pub posting_time: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Field-level edit of a scheduled post. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPostUpdate {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub platforms: Option<Vec<String>>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub status: Option<ScheduledStatus>,
    pub notes: Option<String>,
}

/// Field-level edit of a planned post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedPostUpdate {
    pub title: Option<String>,
    pub suggested_date: Option<NaiveDate>,
    pub suggested_time: Option<String>,
    pub rationale: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub status: Option<PlannedStatus>,
}
