//! Planned post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use autopostr_core::domain::{PlannedPost, PlannedStatus};

use super::{decode_or, string_list};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "planned_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub content_plan_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub suggested_date: String,
    pub suggested_time: String,
    #[sea_orm(column_type = "Text")]
    pub rationale: String,
    pub platforms: Json,
    pub status: String,
    pub order_in_plan: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::content_plan::Entity",
        from = "Column::ContentPlanId",
        to = "super::content_plan::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ContentPlan,
    #[sea_orm(has_many = "super::alarm::Entity")]
    Alarm,
}

impl Related<super::content_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentPlan.def()
    }
}

impl Related<super::alarm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alarm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PlannedPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            content_plan_id: model.content_plan_id,
            user_id: model.user_id,
            title: model.title,
            suggested_date: model.suggested_date,
            suggested_time: model.suggested_time,
            rationale: model.rationale,
            platforms: string_list(model.platforms, "planned_posts.platforms"),
            status: decode_or(
                &model.status,
                "planned_posts.status",
                PlannedStatus::default(),
            ),
            order_in_plan: model.order_in_plan,
            created_at: model.created_at.into(),
        }
    }
}

impl From<PlannedPost> for ActiveModel {
    fn from(post: PlannedPost) -> Self {
        Self {
            id: Set(post.id),
            content_plan_id: Set(post.content_plan_id),
            user_id: Set(post.user_id),
            title: Set(post.title),
            suggested_date: Set(post.suggested_date),
            suggested_time: Set(post.suggested_time),
            rationale: Set(post.rationale),
            platforms: Set(Json::from(post.platforms)),
            status: Set(post.status.as_str().to_string()),
            order_in_plan: Set(post.order_in_plan),
            created_at: Set(post.created_at.into()),
        }
    }
}
