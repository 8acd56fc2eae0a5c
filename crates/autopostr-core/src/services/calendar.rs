//! Calendar aggregation of scheduled and planned posts.
//!
//! The calendar is rebuilt from the two post lists on every call and keeps no
//! state of its own. Scheduled posts are bucketed by their date in their own
//! timezone; planned posts have no timezone and use their naive date.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{PlannedPost, PostKind, PostRef, ScheduledPost};

/// One entry of a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "post", rename_all = "lowercase")]
pub enum CalendarItem {
    Scheduled(ScheduledPost),
    Planned(PlannedPost),
}

impl CalendarItem {
    pub fn kind(&self) -> PostKind {
        match self {
            CalendarItem::Scheduled(_) => PostKind::Scheduled,
            CalendarItem::Planned(_) => PostKind::Planned,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            CalendarItem::Scheduled(post) => post.id,
            CalendarItem::Planned(post) => post.id,
        }
    }

    pub fn post_ref(&self) -> PostRef {
        PostRef {
            kind: self.kind(),
            id: self.id(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CalendarItem::Scheduled(post) => &post.title,
            CalendarItem::Planned(post) => &post.title,
        }
    }

    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            CalendarItem::Scheduled(post) => post.time(),
            CalendarItem::Planned(post) => post.time(),
        }
    }

    /// Scheduled before planned, then by time (unparseable last), then by id.
    fn sort_key(&self) -> (PostKind, bool, Option<NaiveTime>, Uuid) {
        let time = self.time();
        (self.kind(), time.is_none(), time, self.id())
    }
}

/// Posts grouped by calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Calendar {
    days: BTreeMap<NaiveDate, Vec<CalendarItem>>,
    skipped: usize,
}

impl Calendar {
    /// Merge both post lists into per-day buckets.
    ///
    /// A post whose date cannot be read is left out and counted in
    /// [`Calendar::skipped`] instead of failing the whole calendar.
    pub fn aggregate(scheduled: &[ScheduledPost], planned: &[PlannedPost]) -> Self {
        let mut calendar = Calendar::default();

        for post in scheduled {
            match post.calendar_date() {
                Some(date) => calendar.push(date, CalendarItem::Scheduled(post.clone())),
                None => calendar.skip(PostRef::scheduled(post.id), &post.scheduled_date),
            }
        }

        for post in planned {
            match post.calendar_date() {
                Some(date) => calendar.push(date, CalendarItem::Planned(post.clone())),
                None => calendar.skip(PostRef::planned(post.id), &post.suggested_date),
            }
        }

        for items in calendar.days.values_mut() {
            items.sort_by_key(CalendarItem::sort_key);
        }

        calendar
    }

    fn push(&mut self, date: NaiveDate, item: CalendarItem) {
        self.days.entry(date).or_default().push(item);
    }

    fn skip(&mut self, post: PostRef, raw_date: &str) {
        tracing::warn!(
            post_id = %post.id,
            kind = ?post.kind,
            raw_date = %raw_date,
            "Skipping post with unreadable date"
        );
        self.skipped += 1;
    }

    /// Every post on `date`, scheduled and planned together.
    pub fn posts_on(&self, date: NaiveDate) -> &[CalendarItem] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that have at least one post, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Non-empty days within `[start, end]`, e.g. for a month grid.
    pub fn between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDate, &[CalendarItem])> + '_ {
        (start <= end)
            .then(|| self.days.range(start..=end))
            .into_iter()
            .flatten()
            .map(|(date, items)| (*date, items.as_slice()))
    }

    /// Locate a post by identity and kind.
    pub fn find(&self, post: PostRef) -> Option<(NaiveDate, &CalendarItem)> {
        self.days.iter().find_map(|(date, items)| {
            items
                .iter()
                .find(|item| item.post_ref() == post)
                .map(|item| (*date, item))
        })
    }

    /// Number of posts left out because their date could not be read.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Total number of posts on the calendar.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
