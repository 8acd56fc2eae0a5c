//! Alarm entity for SeaORM.
//!
//! Post links are nullable foreign keys; deleting a post clears the link
//! and the alarm becomes a general reminder.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use autopostr_core::domain::{Alarm, AlarmStatus};

use super::decode_or;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alarms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub alarm_datetime: DateTimeWithTimeZone,
    pub scheduled_post_id: Option<Uuid>,
    pub planned_post_id: Option<Uuid>,
    pub sound_enabled: bool,
    pub notification_enabled: bool,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scheduled_post::Entity",
        from = "Column::ScheduledPostId",
        to = "super::scheduled_post::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    ScheduledPost,
    #[sea_orm(
        belongs_to = "super::planned_post::Entity",
        from = "Column::PlannedPostId",
        to = "super::planned_post::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    PlannedPost,
}

impl Related<super::scheduled_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledPost.def()
    }
}

impl Related<super::planned_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlannedPost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Alarm {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            alarm_datetime: model.alarm_datetime.into(),
            scheduled_post_id: model.scheduled_post_id,
            planned_post_id: model.planned_post_id,
            sound_enabled: model.sound_enabled,
            notification_enabled: model.notification_enabled,
            notes: model.notes,
            status: decode_or(&model.status, "alarms.status", AlarmStatus::Active),
            created_at: model.created_at.into(),
        }
    }
}

impl From<Alarm> for ActiveModel {
    fn from(alarm: Alarm) -> Self {
        Self {
            id: Set(alarm.id),
            user_id: Set(alarm.user_id),
            title: Set(alarm.title),
            alarm_datetime: Set(alarm.alarm_datetime.into()),
            scheduled_post_id: Set(alarm.scheduled_post_id),
            planned_post_id: Set(alarm.planned_post_id),
            sound_enabled: Set(alarm.sound_enabled),
            notification_enabled: Set(alarm.notification_enabled),
            notes: Set(alarm.notes),
            status: Set(alarm.status.as_str().to_string()),
            created_at: Set(alarm.created_at.into()),
        }
    }
}
