//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use autopostr_core::domain::{Alarm, AlarmStatus, ContentPlan, PlannedPost, ScheduledPost};
use autopostr_core::error::RepoError;
use autopostr_core::ports::{
    AlarmRepository, ContentPlanRepository, PlannedPostRepository, ScheduledPostRepository,
};

use super::entity::alarm::{self, Entity as AlarmEntity};
use super::entity::content_plan::{self, Entity as ContentPlanEntity};
use super::entity::planned_post::{self, Entity as PlannedPostEntity};
use super::entity::scheduled_post::{self, Entity as ScheduledPostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL scheduled post repository.
pub type PostgresScheduledPostRepository = PostgresBaseRepository<ScheduledPostEntity>;

/// PostgreSQL planned post repository.
pub type PostgresPlannedPostRepository = PostgresBaseRepository<PlannedPostEntity>;

/// PostgreSQL content plan repository.
pub type PostgresContentPlanRepository = PostgresBaseRepository<ContentPlanEntity>;

/// PostgreSQL alarm repository.
pub type PostgresAlarmRepository = PostgresBaseRepository<AlarmEntity>;

#[async_trait]
impl ScheduledPostRepository for PostgresScheduledPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<ScheduledPost>, RepoError> {
        let result = ScheduledPostEntity::find()
            .filter(scheduled_post::Column::UserId.eq(user_id))
            .order_by_asc(scheduled_post::Column::CreatedAt)
            .order_by_asc(scheduled_post::Column::Id)
            .all(self.conn())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert_many(
        &self,
        posts: Vec<ScheduledPost>,
    ) -> Result<Vec<ScheduledPost>, RepoError> {
        if posts.is_empty() {
            return Ok(posts);
        }

        let models: Vec<scheduled_post::ActiveModel> =
            posts.iter().cloned().map(Into::into).collect();
        let inserted = ScheduledPostEntity::insert_many(models)
            .exec_without_returning(self.conn())
            .await
            .map_err(write_error)?;

        tracing::debug!(rows = inserted, "Scheduled posts inserted");
        Ok(posts)
    }
}

#[async_trait]
impl PlannedPostRepository for PostgresPlannedPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<PlannedPost>, RepoError> {
        let result = PlannedPostEntity::find()
            .filter(planned_post::Column::UserId.eq(user_id))
            .order_by_asc(planned_post::Column::CreatedAt)
            .order_by_asc(planned_post::Column::ContentPlanId)
            .order_by_asc(planned_post::Column::OrderInPlan)
            .all(self.conn())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert_many(&self, posts: Vec<PlannedPost>) -> Result<(), RepoError> {
        if posts.is_empty() {
            return Ok(());
        }

        let models: Vec<planned_post::ActiveModel> = posts.into_iter().map(Into::into).collect();
        PlannedPostEntity::insert_many(models)
            .exec_without_returning(self.conn())
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn delete_by_plan(&self, content_plan_id: Uuid) -> Result<u64, RepoError> {
        let result = PlannedPostEntity::delete_many()
            .filter(planned_post::Column::ContentPlanId.eq(content_plan_id))
            .exec(self.conn())
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl ContentPlanRepository for PostgresContentPlanRepository {
    /// Newest plans first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<ContentPlan>, RepoError> {
        let result = ContentPlanEntity::find()
            .filter(content_plan::Column::UserId.eq(user_id))
            .order_by_desc(content_plan::Column::CreatedAt)
            .all(self.conn())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, plan: ContentPlan) -> Result<ContentPlan, RepoError> {
        let model = content_plan::ActiveModel::from(plan)
            .insert(self.conn())
            .await
            .map_err(write_error)?;
        Ok(model.into())
    }
}

#[async_trait]
impl AlarmRepository for PostgresAlarmRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Alarm>, RepoError> {
        let result = AlarmEntity::find()
            .filter(alarm::Column::UserId.eq(user_id))
            .order_by_asc(alarm::Column::AlarmDatetime)
            .order_by_asc(alarm::Column::Id)
            .all(self.conn())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, alarm: Alarm) -> Result<(), RepoError> {
        AlarmEntity::insert(alarm::ActiveModel::from(alarm))
            .exec_without_returning(self.conn())
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: AlarmStatus) -> Result<(), RepoError> {
        let result = AlarmEntity::update_many()
            .col_expr(alarm::Column::Status, Expr::value(status.as_str()))
            .filter(alarm::Column::Id.eq(id))
            .exec(self.conn())
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
