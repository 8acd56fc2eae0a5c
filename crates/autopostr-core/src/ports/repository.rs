use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Alarm, AlarmStatus, ContentPlan, PlannedPost, ScheduledPost};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ScheduledPostRepository: BaseRepository<ScheduledPost, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<ScheduledPost>, RepoError>;

    /// Insert a batch and return the persisted records.
    async fn insert_many(
        &self,
        posts: Vec<ScheduledPost>,
    ) -> Result<Vec<ScheduledPost>, RepoError>;
}

#[async_trait]
pub trait PlannedPostRepository: BaseRepository<PlannedPost, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<PlannedPost>, RepoError>;

    async fn insert_many(&self, posts: Vec<PlannedPost>) -> Result<(), RepoError>;

    /// Remove every planned post of a content plan. Returns how many went.
    async fn delete_by_plan(&self, content_plan_id: Uuid) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait ContentPlanRepository: BaseRepository<ContentPlan, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<ContentPlan>, RepoError>;

    async fn insert(&self, plan: ContentPlan) -> Result<ContentPlan, RepoError>;
}

#[async_trait]
pub trait AlarmRepository: BaseRepository<Alarm, Uuid> {
    /// Alarms of a user ordered by `alarm_datetime` ascending.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Alarm>, RepoError>;

    async fn insert(&self, alarm: Alarm) -> Result<(), RepoError>;

    async fn update_status(&self, id: Uuid, status: AlarmStatus) -> Result<(), RepoError>;
}

/// The full set of store ports the planner session talks to.
#[derive(Clone)]
pub struct PlannerStore {
    pub scheduled_posts: Arc<dyn ScheduledPostRepository>,
    pub planned_posts: Arc<dyn PlannedPostRepository>,
    pub content_plans: Arc<dyn ContentPlanRepository>,
    pub alarms: Arc<dyn AlarmRepository>,
}
