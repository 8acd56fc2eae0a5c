//! Planner session - drives the engine against the store for one user.
//!
//! The session owns the user's in-memory copies of posts, plans and alarms.
//! Writes go to the store first; the returned records are applied locally
//! right away and then reconciled with an authoritative reload, so the
//! calendar never flashes empty between the insert and the reload.

use std::collections::HashSet;

use chrono::{NaiveTime, Utc};
use uuid::Uuid;

use super::alarms::{self, AlarmTarget};
use super::calendar::Calendar;
use super::content_planner::{PlanRequest, SYSTEM_DEFAULT_PLATFORM, expand_plan};
use super::recurrence::RecurrenceRule;
use super::requests::{
    ContentPlanRequest, PlannedPostUpdate, PostContent, SchedulePostRequest, ScheduledPostUpdate,
    SmartScheduleRequest,
};
use crate::domain::{
    Alarm, AlarmStatus, BrandContext, ContentPlan, Entity, NewAlarm, PlannedPost, PlannerSettings,
    PostKind, PostRef, ScheduledPost, ScheduledPostDraft, ScheduledStatus, format_date,
    format_time, ordered_set, parse_time,
};
use crate::error::{PlannerError, PlannerResult, RepoError};
use crate::ports::PlannerStore;

/// Top-level view of the planner UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Generator,
    Calendar,
}

/// Independent modal visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modals {
    pub brand_profile: bool,
    pub schedule_post: bool,
    pub plan_generator: bool,
    pub smart_planner: bool,
    pub alarm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub mode: ViewMode,
    pub modals: Modals,
}

/// A stored content plan together with its planned posts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub plan: ContentPlan,
    pub posts: Vec<PlannedPost>,
    pub requested: usize,
}

impl PlanOutcome {
    pub fn produced(&self) -> usize {
        self.posts.len()
    }

    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.posts.len())
    }
}

pub struct PlannerSession {
    user_id: Uuid,
    store: PlannerStore,
    settings: PlannerSettings,
    brand: BrandContext,
    timezone: String,
    scheduled_posts: Vec<ScheduledPost>,
    planned_posts: Vec<PlannedPost>,
    content_plans: Vec<ContentPlan>,
    alarms: Vec<Alarm>,
    /// Records written by this session that no reload has returned yet.
    pending: HashSet<Uuid>,
    view: ViewState,
}

impl PlannerSession {
    pub fn new(user_id: Uuid, store: PlannerStore, settings: PlannerSettings) -> Self {
        let timezone = settings.default_timezone.clone();
        Self {
            user_id,
            store,
            settings,
            brand: BrandContext::default(),
            timezone,
            scheduled_posts: Vec::new(),
            planned_posts: Vec::new(),
            content_plans: Vec::new(),
            alarms: Vec::new(),
            pending: HashSet::new(),
            view: ViewState::default(),
        }
    }

    pub fn with_brand(mut self, brand: BrandContext) -> Self {
        self.brand = brand;
        self
    }

    /// Timezone stamped on posts scheduled from this session.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn brand(&self) -> &BrandContext {
        &self.brand
    }

    pub fn scheduled_posts(&self) -> &[ScheduledPost] {
        &self.scheduled_posts
    }

    pub fn planned_posts(&self) -> &[PlannedPost] {
        &self.planned_posts
    }

    pub fn content_plans(&self) -> &[ContentPlan] {
        &self.content_plans
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Calendar of everything the session currently holds.
    pub fn calendar(&self) -> Calendar {
        Calendar::aggregate(&self.scheduled_posts, &self.planned_posts)
    }

    /// What `alarm` points at right now; dangling links resolve to general.
    pub fn alarm_target<'a>(&self, alarm: &Alarm, calendar: &'a Calendar) -> AlarmTarget<'a> {
        alarms::resolve_target(alarm, calendar)
    }

    /// Load all four collections from the store.
    pub async fn load_all(&mut self) -> PlannerResult<()> {
        let (scheduled, planned, plans, alarms) = futures::try_join!(
            self.store.scheduled_posts.find_by_user_id(self.user_id),
            self.store.planned_posts.find_by_user_id(self.user_id),
            self.store.content_plans.find_by_user_id(self.user_id),
            self.store.alarms.find_by_user_id(self.user_id),
        )?;

        tracing::debug!(
            user_id = %self.user_id,
            scheduled = scheduled.len(),
            planned = planned.len(),
            plans = plans.len(),
            alarms = alarms.len(),
            "Planner data loaded"
        );

        reconcile(&mut self.scheduled_posts, scheduled, &mut self.pending);
        reconcile(&mut self.planned_posts, planned, &mut self.pending);
        reconcile(&mut self.content_plans, plans, &mut self.pending);
        reconcile(&mut self.alarms, alarms, &mut self.pending);
        Ok(())
    }

    async fn reload_scheduled(&mut self) -> PlannerResult<()> {
        let scheduled = self
            .store
            .scheduled_posts
            .find_by_user_id(self.user_id)
            .await?;
        reconcile(&mut self.scheduled_posts, scheduled, &mut self.pending);
        Ok(())
    }

    async fn reload_plans(&mut self) -> PlannerResult<()> {
        let (plans, planned) = futures::try_join!(
            self.store.content_plans.find_by_user_id(self.user_id),
            self.store.planned_posts.find_by_user_id(self.user_id),
        )?;
        reconcile(&mut self.content_plans, plans, &mut self.pending);
        reconcile(&mut self.planned_posts, planned, &mut self.pending);
        Ok(())
    }

    async fn reload_alarms(&mut self) -> PlannerResult<()> {
        let alarms = self.store.alarms.find_by_user_id(self.user_id).await?;
        reconcile(&mut self.alarms, alarms, &mut self.pending);
        Ok(())
    }

    /// Schedule content the user has confirmed.
    pub async fn schedule_post(
        &mut self,
        request: SchedulePostRequest,
        content: PostContent,
    ) -> PlannerResult<ScheduledPost> {
        let time = require_time(&request.scheduled_time)?;
        let title = request.title.trim();
        if title.is_empty() {
            return Err(PlannerError::Validation("post title is required".to_string()));
        }

        let platforms = match ordered_set(request.platforms) {
            platforms if platforms.is_empty() => self.default_platforms(),
            platforms => platforms,
        };

        let post = ScheduledPost::new(ScheduledPostDraft {
            user_id: self.user_id,
            brand_profile_id: self.brand.brand_profile_id,
            title: title.to_string(),
            caption: content.caption,
            hashtags: content.hashtags,
            platforms,
            image_url: content.image_url,
            date: request.scheduled_date,
            time,
            timezone: self.timezone.clone(),
            status: ScheduledStatus::Scheduled,
            notes: request.notes,
        });

        let mut stored = self.store.scheduled_posts.insert_many(vec![post]).await?;
        let post = stored.pop().ok_or_else(|| {
            RepoError::Query("store returned no record for the scheduled post".to_string())
        })?;

        tracing::info!(
            user_id = %self.user_id,
            post_id = %post.id,
            date = %post.scheduled_date,
            "Post scheduled"
        );

        self.apply_scheduled(std::slice::from_ref(&post));
        self.reload_scheduled().await?;
        self.view.modals.schedule_post = false;
        self.view.mode = ViewMode::Calendar;
        Ok(post)
    }

    /// Generate a recurring run of draft posts and store them.
    pub async fn generate_smart_schedule(
        &mut self,
        request: SmartScheduleRequest,
    ) -> PlannerResult<Vec<ScheduledPost>> {
        let rule = RecurrenceRule::parse(&request.frequency, Some(&request.preferred_day))?;
        let time = require_time(&request.preferred_time)?;
        let dates = rule.dates(request.start_date, request.number_of_posts)?;

        let platforms = self.default_platforms();
        let drafts: Vec<ScheduledPost> = dates
            .into_iter()
            .enumerate()
            .map(|(index, date)| {
                ScheduledPost::new(ScheduledPostDraft {
                    user_id: self.user_id,
                    brand_profile_id: self.brand.brand_profile_id,
                    title: format!("Scheduled Post #{}", index + 1),
                    caption: self.settings.placeholder_caption.clone(),
                    hashtags: Vec::new(),
                    platforms: platforms.clone(),
                    image_url: None,
                    date,
                    time,
                    timezone: self.timezone.clone(),
                    status: ScheduledStatus::Draft,
                    notes: format!("Auto-generated {} schedule", rule.frequency),
                })
            })
            .collect();

        let stored = self.store.scheduled_posts.insert_many(drafts).await?;
        tracing::info!(
            user_id = %self.user_id,
            count = stored.len(),
            frequency = %rule.frequency,
            "Smart schedule generated"
        );

        self.apply_scheduled(&stored);
        self.reload_scheduled().await?;
        self.view.modals.smart_planner = false;
        self.view.mode = ViewMode::Calendar;
        Ok(stored)
    }

    /// Expand and store a content plan with its planned posts.
    ///
    /// A range too short for the requested count stores what fits; the
    /// outcome reports requested versus produced.
    pub async fn create_content_plan(
        &mut self,
        request: ContentPlanRequest,
    ) -> PlannerResult<PlanOutcome> {
        let name = request.plan_name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation("plan name is required".to_string()));
        }

        let rule = RecurrenceRule::parse(&request.frequency, request.preferred_day.as_deref())?;
        let posting_time = request
            .posting_time
            .as_deref()
            .map(require_time)
            .transpose()?;

        let expansion = expand_plan(
            &PlanRequest {
                start_date: request.start_date,
                end_date: request.end_date,
                frequency: rule.frequency,
                preferred_day: rule.preferred_day,
                count: request.number_of_posts,
                posting_time,
                platforms: request.platforms,
            },
            &self.brand,
            &self.settings,
        )?;

        let plan = self
            .store
            .content_plans
            .insert(ContentPlan::new(
                self.user_id,
                self.brand.brand_profile_id,
                name.to_string(),
                request.start_date,
                request.end_date,
                rule.frequency,
                expansion.produced(),
            ))
            .await?;

        let posts: Vec<PlannedPost> = expansion
            .posts
            .into_iter()
            .map(|draft| draft.into_planned_post(plan.id, self.user_id))
            .collect();
        if let Err(e) = self.store.planned_posts.insert_many(posts.clone()).await {
            if let Err(cleanup) = self.store.content_plans.delete(plan.id).await {
                tracing::warn!(
                    user_id = %self.user_id,
                    plan_id = %plan.id,
                    error = %cleanup,
                    "Failed to remove content plan after its posts were rejected"
                );
            }
            return Err(e.into());
        }

        tracing::info!(
            user_id = %self.user_id,
            plan_id = %plan.id,
            requested = expansion.requested,
            produced = posts.len(),
            "Content plan created"
        );

        self.pending.insert(plan.id);
        self.content_plans.push(plan.clone());
        self.pending.extend(posts.iter().map(Entity::id));
        self.planned_posts.extend(posts.iter().cloned());

        self.reload_plans().await?;
        self.view.modals.plan_generator = false;
        self.view.mode = ViewMode::Calendar;

        Ok(PlanOutcome {
            plan,
            posts,
            requested: expansion.requested,
        })
    }

    pub async fn edit_scheduled_post(
        &mut self,
        id: Uuid,
        update: ScheduledPostUpdate,
    ) -> PlannerResult<ScheduledPost> {
        let mut post = match self.scheduled_posts.iter().find(|p| p.id == id) {
            Some(post) => post.clone(),
            None => self
                .store
                .scheduled_posts
                .find_by_id(id)
                .await?
                .ok_or(PlannerError::NotFound {
                    entity_type: "scheduled_post",
                    id,
                })?,
        };

        if let Some(raw) = update.scheduled_time.as_deref() {
            post.scheduled_time = format_time(require_time(raw)?);
        }
        if let Some(date) = update.scheduled_date {
            post.scheduled_date = format_date(date);
        }
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(caption) = update.caption {
            post.caption = caption;
        }
        if let Some(hashtags) = update.hashtags {
            post.set_hashtags(hashtags);
        }
        if let Some(platforms) = update.platforms {
            post.set_platforms(platforms);
        }
        if let Some(status) = update.status {
            post.status = status;
        }
        if let Some(notes) = update.notes {
            post.notes = notes;
        }
        post.updated_at = Utc::now();

        let saved = self.store.scheduled_posts.save(post).await?;
        tracing::debug!(user_id = %self.user_id, post_id = %saved.id, "Scheduled post edited");
        replace_or_push(&mut self.scheduled_posts, saved.clone());
        Ok(saved)
    }

    pub async fn edit_planned_post(
        &mut self,
        id: Uuid,
        update: PlannedPostUpdate,
    ) -> PlannerResult<PlannedPost> {
        let mut post = match self.planned_posts.iter().find(|p| p.id == id) {
            Some(post) => post.clone(),
            None => self
                .store
                .planned_posts
                .find_by_id(id)
                .await?
                .ok_or(PlannerError::NotFound {
                    entity_type: "planned_post",
                    id,
                })?,
        };

        if let Some(raw) = update.suggested_time.as_deref() {
            post.suggested_time = format_time(require_time(raw)?);
        }
        if let Some(date) = update.suggested_date {
            post.suggested_date = format_date(date);
        }
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(rationale) = update.rationale {
            post.rationale = rationale;
        }
        if let Some(platforms) = update.platforms {
            post.set_platforms(platforms);
        }
        if let Some(status) = update.status {
            post.status = status;
        }

        let saved = self.store.planned_posts.save(post).await?;
        tracing::debug!(user_id = %self.user_id, post_id = %saved.id, "Planned post edited");
        replace_or_push(&mut self.planned_posts, saved.clone());
        Ok(saved)
    }

    /// Delete a post of either kind. Alarms pointing at it are left as-is.
    pub async fn delete_post(&mut self, post: PostRef) -> PlannerResult<()> {
        match post.kind {
            PostKind::Scheduled => {
                self.store.scheduled_posts.delete(post.id).await?;
                self.scheduled_posts.retain(|p| p.id != post.id);
            }
            PostKind::Planned => {
                self.store.planned_posts.delete(post.id).await?;
                self.planned_posts.retain(|p| p.id != post.id);
            }
        }
        self.pending.remove(&post.id);
        tracing::info!(user_id = %self.user_id, post_id = %post.id, kind = ?post.kind, "Post deleted");
        Ok(())
    }

    /// Delete a content plan together with its planned posts.
    ///
    /// The plan row goes first, so a failure on the second step leaves
    /// orphaned planned posts rather than a plan missing its posts.
    pub async fn delete_content_plan(&mut self, plan_id: Uuid) -> PlannerResult<()> {
        self.store.content_plans.delete(plan_id).await?;
        self.content_plans.retain(|p| p.id != plan_id);
        self.pending.remove(&plan_id);

        let removed = match self.store.planned_posts.delete_by_plan(plan_id).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(
                    user_id = %self.user_id,
                    plan_id = %plan_id,
                    error = %e,
                    "Content plan deleted but its planned posts were not"
                );
                return Err(e.into());
            }
        };
        self.planned_posts.retain(|p| p.content_plan_id != plan_id);

        tracing::info!(user_id = %self.user_id, plan_id = %plan_id, removed, "Content plan deleted");
        self.reload_plans().await
    }

    pub async fn create_alarm(&mut self, request: NewAlarm) -> PlannerResult<Alarm> {
        let alarm = alarms::create_alarm(self.user_id, request)?;
        self.store.alarms.insert(alarm.clone()).await?;

        tracing::info!(
            user_id = %self.user_id,
            alarm_id = %alarm.id,
            linked = alarm.link().is_some(),
            "Alarm created"
        );

        self.pending.insert(alarm.id);
        self.alarms.push(alarm.clone());
        self.view.modals.alarm = false;
        self.reload_alarms().await?;
        Ok(alarm)
    }

    /// Dismiss an alarm. Dismissing an already dismissed alarm does nothing.
    pub async fn dismiss_alarm(&mut self, id: Uuid) -> PlannerResult<()> {
        if self.alarms.iter().any(|a| a.id == id && !a.is_active()) {
            return Ok(());
        }

        self.store
            .alarms
            .update_status(id, AlarmStatus::Dismissed)
            .await?;
        if let Some(alarm) = self.alarms.iter_mut().find(|a| a.id == id) {
            alarm.dismiss();
        }
        self.reload_alarms().await
    }

    pub async fn delete_alarm(&mut self, id: Uuid) -> PlannerResult<()> {
        self.store.alarms.delete(id).await?;
        self.alarms.retain(|a| a.id != id);
        self.pending.remove(&id);
        self.reload_alarms().await
    }

    fn default_platforms(&self) -> Vec<String> {
        [&self.brand.platforms, &self.settings.default_platforms]
            .into_iter()
            .map(ordered_set)
            .find(|platforms| !platforms.is_empty())
            .unwrap_or_else(|| vec![SYSTEM_DEFAULT_PLATFORM.to_string()])
    }

    fn apply_scheduled(&mut self, posts: &[ScheduledPost]) {
        for post in posts {
            self.pending.insert(post.id);
            replace_or_push(&mut self.scheduled_posts, post.clone());
        }
    }
}

fn require_time(raw: &str) -> PlannerResult<NaiveTime> {
    parse_time(raw).ok_or_else(|| PlannerError::Validation(format!("invalid time '{raw}'")))
}

fn replace_or_push<T: Entity>(records: &mut Vec<T>, record: T) {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

/// Replace `local` with the authoritative read. Records this session wrote
/// that the read does not contain yet are carried over; once a read returns
/// them they stop being pending.
fn reconcile<T: Entity>(local: &mut Vec<T>, authoritative: Vec<T>, pending: &mut HashSet<Uuid>) {
    let seen: HashSet<Uuid> = authoritative.iter().map(Entity::id).collect();
    pending.retain(|id| !seen.contains(id));

    let carried: Vec<T> = local
        .drain(..)
        .filter(|record| pending.contains(&record.id()))
        .collect();

    *local = authoritative;
    local.extend(carried);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlannedStatus;

    fn planned(id: u128, title: &str) -> PlannedPost {
        PlannedPost {
            id: Uuid::from_u128(id),
            content_plan_id: Uuid::nil(),
            user_id: Uuid::nil(),
            title: title.to_string(),
            suggested_date: "2024-06-03".to_string(),
            suggested_time: "09:00".to_string(),
            rationale: String::new(),
            platforms: Vec::new(),
            status: PlannedStatus::Suggested,
            order_in_plan: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reconcile_prefers_authoritative_version() {
        let mut local = vec![planned(1, "local edit")];
        let mut pending = HashSet::new();
        reconcile(&mut local, vec![planned(1, "stored")], &mut pending);
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].title, "stored");
    }

    #[test]
    fn test_reconcile_keeps_pending_until_seen() {
        let mut local = vec![planned(1, "old"), planned(2, "just written")];
        let mut pending = HashSet::from([Uuid::from_u128(2)]);

        // Reload that has not caught up with the write yet.
        reconcile(&mut local, vec![planned(1, "old")], &mut pending);
        assert_eq!(local.len(), 2);
        assert!(pending.contains(&Uuid::from_u128(2)));

        // Reload that includes it: no duplicate, no longer pending.
        reconcile(
            &mut local,
            vec![planned(1, "old"), planned(2, "just written")],
            &mut pending,
        );
        assert_eq!(local.len(), 2);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_reconcile_drops_records_deleted_elsewhere() {
        let mut local = vec![planned(1, "a"), planned(2, "b")];
        let mut pending = HashSet::new();
        reconcile(&mut local, vec![planned(2, "b")], &mut pending);
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].id, Uuid::from_u128(2));
    }

    #[test]
    fn test_require_time() {
        assert!(require_time("10:30").is_ok());
        assert!(matches!(
            require_time("late"),
            Err(PlannerError::Validation(_))
        ));
    }
}
