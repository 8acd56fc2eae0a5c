//! In-memory repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use autopostr_core::domain::{Alarm, AlarmStatus, ContentPlan, Entity, PlannedPost, ScheduledPost};
use autopostr_core::error::RepoError;
use autopostr_core::ports::{
    AlarmRepository, BaseRepository, ContentPlanRepository, PlannedPostRepository,
    ScheduledPostRepository,
};

/// Generic in-memory repository keyed by entity ID, guarded by an async RwLock.
pub struct InMemoryRepository<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRepository<T>
where
    T: Entity + Clone,
{
    async fn rows_for_user(&self, user_id: Uuid) -> Vec<T> {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| row.user_id() == user_id)
            .cloned()
            .collect()
    }

    /// Insert all records or none of them.
    async fn insert_all(&self, records: Vec<T>) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        if let Some(dup) = records.iter().find(|r| rows.contains_key(&r.id())) {
            return Err(RepoError::Constraint(format!(
                "record {} already exists",
                dup.id()
            )));
        }
        for record in records {
            rows.insert(record.id(), record);
        }
        Ok(())
    }
}

#[async_trait]
impl<T> BaseRepository<T, Uuid> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        self.rows.write().await.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl ScheduledPostRepository for InMemoryRepository<ScheduledPost> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<ScheduledPost>, RepoError> {
        let mut posts = self.rows_for_user(user_id).await;
        posts.sort_by_key(|p| (p.created_at, p.id));
        Ok(posts)
    }

    async fn insert_many(
        &self,
        posts: Vec<ScheduledPost>,
    ) -> Result<Vec<ScheduledPost>, RepoError> {
        self.insert_all(posts.clone()).await?;
        tracing::debug!(count = posts.len(), "Scheduled posts inserted");
        Ok(posts)
    }
}

#[async_trait]
impl PlannedPostRepository for InMemoryRepository<PlannedPost> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<PlannedPost>, RepoError> {
        let mut posts = self.rows_for_user(user_id).await;
        posts.sort_by_key(|p| (p.created_at, p.content_plan_id, p.order_in_plan, p.id));
        Ok(posts)
    }

    async fn insert_many(&self, posts: Vec<PlannedPost>) -> Result<(), RepoError> {
        let count = posts.len();
        self.insert_all(posts).await?;
        tracing::debug!(count, "Planned posts inserted");
        Ok(())
    }

    async fn delete_by_plan(&self, content_plan_id: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, post| post.content_plan_id != content_plan_id);
        Ok((before - rows.len()) as u64)
    }
}

#[async_trait]
impl ContentPlanRepository for InMemoryRepository<ContentPlan> {
    /// Newest plans first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<ContentPlan>, RepoError> {
        let mut plans = self.rows_for_user(user_id).await;
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(plans)
    }

    async fn insert(&self, plan: ContentPlan) -> Result<ContentPlan, RepoError> {
        self.insert_all(vec![plan.clone()]).await?;
        Ok(plan)
    }
}

#[async_trait]
impl AlarmRepository for InMemoryRepository<Alarm> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Alarm>, RepoError> {
        let mut alarms = self.rows_for_user(user_id).await;
        alarms.sort_by_key(|a| (a.alarm_datetime, a.id));
        Ok(alarms)
    }

    async fn insert(&self, alarm: Alarm) -> Result<(), RepoError> {
        self.insert_all(vec![alarm]).await
    }

    async fn update_status(&self, id: Uuid, status: AlarmStatus) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let alarm = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        alarm.status = status;
        Ok(())
    }
}
