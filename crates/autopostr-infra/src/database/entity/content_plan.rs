//! Content plan entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use autopostr_core::domain::{ContentPlan, Frequency, PlanStatus};

use super::decode_or;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand_profile_id: Option<Uuid>,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub frequency: String,
    /// Posts actually produced, not the requested count.
    pub total_posts: i32,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::planned_post::Entity")]
    PlannedPost,
}

impl Related<super::planned_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlannedPost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContentPlan {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            brand_profile_id: model.brand_profile_id,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
            frequency: decode_or(&model.frequency, "content_plans.frequency", Frequency::Weekly),
            total_posts: model.total_posts,
            status: decode_or(&model.status, "content_plans.status", PlanStatus::Active),
            created_at: model.created_at.into(),
        }
    }
}

impl From<ContentPlan> for ActiveModel {
    fn from(plan: ContentPlan) -> Self {
        Self {
            id: Set(plan.id),
            user_id: Set(plan.user_id),
            brand_profile_id: Set(plan.brand_profile_id),
            name: Set(plan.name),
            start_date: Set(plan.start_date),
            end_date: Set(plan.end_date),
            frequency: Set(plan.frequency.as_str().to_string()),
            total_posts: Set(plan.total_posts),
            status: Set(plan.status.as_str().to_string()),
            created_at: Set(plan.created_at.into()),
        }
    }
}
