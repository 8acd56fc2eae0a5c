use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates::{format_date, format_time, parse_date, parse_time, parse_timestamp};
use super::{Entity, ordered_set};
use crate::error::PlannerError;

const TITLE_MAX_LENGTH: usize = 50;

/// Lifecycle of a scheduled post. Publishing is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduledStatus {
    /// Auto-generated by a smart schedule, not yet confirmed.
    #[default]
    Draft,
    /// Confirmed by the user.
    Scheduled,
}

impl ScheduledStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduledStatus::Draft => "draft",
            ScheduledStatus::Scheduled => "scheduled",
        }
    }
}

impl FromStr for ScheduledStatus {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ScheduledStatus::Draft),
            "scheduled" => Ok(ScheduledStatus::Scheduled),
            other => Err(PlannerError::Validation(format!(
                "unknown scheduled post status '{other}'"
            ))),
        }
    }
}

/// ScheduledPost entity - a post with a concrete date, time and timezone.
///
/// `scheduled_date` and `scheduled_time` are kept in the textual form the
/// store hands back; use [`ScheduledPost::calendar_date`] and
/// [`ScheduledPost::time`] for typed access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand_profile_id: Option<Uuid>,
    pub title: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub platforms: Vec<String>,
    pub image_url: Option<String>,
    pub scheduled_date: String,
    pub scheduled_time: String,
    /// IANA timezone name, e.g. `Europe/Berlin`.
    pub timezone: String,
    pub status: ScheduledStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create a scheduled post, before it has an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPostDraft {
    pub user_id: Uuid,
    pub brand_profile_id: Option<Uuid>,
    pub title: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub platforms: Vec<String>,
    pub image_url: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub timezone: String,
    pub status: ScheduledStatus,
    pub notes: String,
}

impl ScheduledPost {
    /// Create a new scheduled post from a draft with a generated ID and timestamps.
    pub fn new(draft: ScheduledPostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            brand_profile_id: draft.brand_profile_id,
            title: draft.title,
            caption: draft.caption,
            hashtags: normalize_hashtags(draft.hashtags),
            platforms: ordered_set(draft.platforms),
            image_url: draft.image_url.filter(|url| !url.is_empty()),
            scheduled_date: format_date(draft.date),
            scheduled_time: format_time(draft.time),
            timezone: draft.timezone,
            status: draft.status,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// The calendar day this post lands on.
    ///
    /// Plain dates are taken as-is. A full timestamp is first converted into
    /// the post's own timezone so a late-evening UTC time lands on the local day.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        if let Some(ts) = parse_timestamp(&self.scheduled_date) {
            return Some(match self.timezone.parse::<Tz>() {
                Ok(tz) => ts.with_timezone(&tz).date_naive(),
                Err(_) => ts.date_naive(),
            });
        }
        parse_date(&self.scheduled_date)
    }

    pub fn time(&self) -> Option<NaiveTime> {
        parse_time(&self.scheduled_time)
    }

    pub fn set_hashtags(&mut self, tags: Vec<String>) {
        self.hashtags = normalize_hashtags(tags);
    }

    pub fn set_platforms(&mut self, platforms: Vec<String>) {
        self.platforms = ordered_set(platforms);
    }

    /// Derive a post title from a campaign description: the first sentence
    /// when it is short enough, otherwise a truncated prefix.
    pub fn title_from_description(description: &str) -> String {
        let desc = description.trim();
        let first_sentence = desc.split(['.', '!', '?']).next().unwrap_or_default();

        if first_sentence.chars().count() <= TITLE_MAX_LENGTH {
            return first_sentence.to_string();
        }

        let prefix: String = desc.chars().take(TITLE_MAX_LENGTH).collect();
        format!("{prefix}...")
    }
}

impl Entity for ScheduledPost {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

/// Hashtags keep their case but gain a leading `#` and lose duplicates.
fn normalize_hashtags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().trim_start_matches('#');
        if tag.is_empty() {
            continue;
        }
        let tag = format!("#{tag}");
        if !out.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            out.push(tag);
        }
    }
    out
}
