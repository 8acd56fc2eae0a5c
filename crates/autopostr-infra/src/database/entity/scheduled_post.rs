//! Scheduled post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use autopostr_core::domain::{ScheduledPost, ScheduledStatus};

use super::{decode_or, string_list};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scheduled_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand_profile_id: Option<Uuid>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub caption: String,
    /// JSON array of `#tag` strings.
    pub hashtags: Json,
    /// JSON array of platform identifiers.
    pub platforms: Json,
    pub image_url: Option<String>,
    /// `YYYY-MM-DD`, or an ISO timestamp written by older clients.
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub timezone: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::alarm::Entity")]
    Alarm,
}

impl Related<super::alarm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alarm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ScheduledPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            brand_profile_id: model.brand_profile_id,
            title: model.title,
            caption: model.caption,
            hashtags: string_list(model.hashtags, "scheduled_posts.hashtags"),
            platforms: string_list(model.platforms, "scheduled_posts.platforms"),
            image_url: model.image_url,
            scheduled_date: model.scheduled_date,
            scheduled_time: model.scheduled_time,
            timezone: model.timezone,
            status: decode_or(
                &model.status,
                "scheduled_posts.status",
                ScheduledStatus::default(),
            ),
            notes: model.notes,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<ScheduledPost> for ActiveModel {
    fn from(post: ScheduledPost) -> Self {
        Self {
            id: Set(post.id),
            user_id: Set(post.user_id),
            brand_profile_id: Set(post.brand_profile_id),
            title: Set(post.title),
            caption: Set(post.caption),
            hashtags: Set(Json::from(post.hashtags)),
            platforms: Set(Json::from(post.platforms)),
            image_url: Set(post.image_url),
            scheduled_date: Set(post.scheduled_date),
            scheduled_time: Set(post.scheduled_time),
            timezone: Set(post.timezone),
            status: Set(post.status.as_str().to_string()),
            notes: Set(post.notes),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
