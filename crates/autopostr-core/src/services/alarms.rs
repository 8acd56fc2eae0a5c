//! Alarm linking.
//!
//! An alarm points at no post or at exactly one post of either kind. Links
//! are never re-validated: a post deleted after the alarm was created simply
//! turns the alarm into a general reminder.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::calendar::{Calendar, CalendarItem};
use crate::domain::{Alarm, AlarmStatus, NewAlarm, PlannedPost, PostKind, PostRef, ScheduledPost};
use crate::error::{PlannerError, PlannerResult};

/// What an alarm resolves to at display time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlarmTarget<'a> {
    Scheduled(&'a ScheduledPost),
    Planned(&'a PlannedPost),
    /// Unlinked, or linked to a post that no longer exists.
    General,
}

impl NewAlarm {
    /// An alarm request linked to `post`.
    pub fn for_post(title: impl Into<String>, alarm_datetime: DateTime<Utc>, post: PostRef) -> Self {
        let (scheduled_post_id, planned_post_id) = match post.kind {
            PostKind::Scheduled => (Some(post.id), None),
            PostKind::Planned => (None, Some(post.id)),
        };
        Self {
            title: title.into(),
            alarm_datetime,
            scheduled_post_id,
            planned_post_id,
            sound_enabled: true,
            notification_enabled: true,
            notes: String::new(),
        }
    }

    /// A general reminder not tied to any post.
    pub fn general(title: impl Into<String>, alarm_datetime: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            alarm_datetime,
            scheduled_post_id: None,
            planned_post_id: None,
            sound_enabled: true,
            notification_enabled: true,
            notes: String::new(),
        }
    }
}

/// Validate an alarm request and turn it into an active alarm for `user_id`.
pub fn create_alarm(user_id: Uuid, request: NewAlarm) -> PlannerResult<Alarm> {
    if request.scheduled_post_id.is_some() && request.planned_post_id.is_some() {
        return Err(PlannerError::AmbiguousLink);
    }

    let title = request.title.trim();
    if title.is_empty() {
        return Err(PlannerError::Validation("alarm title is required".to_string()));
    }

    Ok(Alarm {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_string(),
        alarm_datetime: request.alarm_datetime,
        scheduled_post_id: request.scheduled_post_id,
        planned_post_id: request.planned_post_id,
        sound_enabled: request.sound_enabled,
        notification_enabled: request.notification_enabled,
        notes: request.notes,
        status: AlarmStatus::Active,
        created_at: Utc::now(),
    })
}

/// Resolve the post an alarm points at against the current calendar.
pub fn resolve_target<'a>(alarm: &Alarm, calendar: &'a Calendar) -> AlarmTarget<'a> {
    let Some(link) = alarm.link() else {
        return AlarmTarget::General;
    };

    match calendar.find(link) {
        Some((_, CalendarItem::Scheduled(post))) => AlarmTarget::Scheduled(post),
        Some((_, CalendarItem::Planned(post))) => AlarmTarget::Planned(post),
        None => {
            tracing::debug!(alarm_id = %alarm.id, post_id = %link.id, "Alarm link is dangling");
            AlarmTarget::General
        }
    }
}

/// Active alarms at or after `now`, soonest first.
pub fn upcoming(alarms: &[Alarm], now: DateTime<Utc>) -> Vec<&Alarm> {
    let mut out: Vec<&Alarm> = alarms
        .iter()
        .filter(|a| a.is_active() && a.alarm_datetime >= now)
        .collect();
    out.sort_by_key(|a| (a.alarm_datetime, a.id));
    out
}

/// Active alarms whose time has passed, oldest first.
pub fn due(alarms: &[Alarm], now: DateTime<Utc>) -> Vec<&Alarm> {
    let mut out: Vec<&Alarm> = alarms
        .iter()
        .filter(|a| a.is_active() && a.alarm_datetime < now)
        .collect();
    out.sort_by_key(|a| (a.alarm_datetime, a.id));
    out
}
