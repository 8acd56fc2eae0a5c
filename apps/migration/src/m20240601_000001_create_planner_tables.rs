use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ScheduledPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ScheduledPosts::UserId).uuid().not_null())
                    .col(ColumnDef::new(ScheduledPosts::BrandProfileId).uuid())
                    .col(ColumnDef::new(ScheduledPosts::Title).string().not_null())
                    .col(ColumnDef::new(ScheduledPosts::Caption).text().not_null())
                    .col(
                        ColumnDef::new(ScheduledPosts::Hashtags)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(ScheduledPosts::Platforms)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(ScheduledPosts::ImageUrl).string())
                    .col(ColumnDef::new(ScheduledPosts::ScheduledDate).string().not_null())
                    .col(ColumnDef::new(ScheduledPosts::ScheduledTime).string().not_null())
                    .col(
                        ColumnDef::new(ScheduledPosts::Timezone)
                            .string()
                            .not_null()
                            .default("UTC"),
                    )
                    .col(
                        ColumnDef::new(ScheduledPosts::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(ScheduledPosts::Notes).text().not_null().default(""))
                    .col(timestamp_column(ScheduledPosts::CreatedAt))
                    .col(timestamp_column(ScheduledPosts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContentPlans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ContentPlans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ContentPlans::UserId).uuid().not_null())
                    .col(ColumnDef::new(ContentPlans::BrandProfileId).uuid())
                    .col(ColumnDef::new(ContentPlans::Name).string().not_null())
                    .col(ColumnDef::new(ContentPlans::StartDate).date().not_null())
                    .col(ColumnDef::new(ContentPlans::EndDate).date().not_null())
                    .col(ColumnDef::new(ContentPlans::Frequency).string().not_null())
                    .col(ColumnDef::new(ContentPlans::TotalPosts).integer().not_null())
                    .col(
                        ColumnDef::new(ContentPlans::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(timestamp_column(ContentPlans::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlannedPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlannedPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PlannedPosts::ContentPlanId).uuid().not_null())
                    .col(ColumnDef::new(PlannedPosts::UserId).uuid().not_null())
                    .col(ColumnDef::new(PlannedPosts::Title).string().not_null())
                    .col(ColumnDef::new(PlannedPosts::SuggestedDate).string().not_null())
                    .col(ColumnDef::new(PlannedPosts::SuggestedTime).string().not_null())
                    .col(ColumnDef::new(PlannedPosts::Rationale).text().not_null().default(""))
                    .col(
                        ColumnDef::new(PlannedPosts::Platforms)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(PlannedPosts::Status)
                            .string()
                            .not_null()
                            .default("suggested"),
                    )
                    .col(ColumnDef::new(PlannedPosts::OrderInPlan).integer().not_null())
                    .col(timestamp_column(PlannedPosts::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_planned_posts_content_plan")
                            .from(PlannedPosts::Table, PlannedPosts::ContentPlanId)
                            .to(ContentPlans::Table, ContentPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alarms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Alarms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Alarms::UserId).uuid().not_null())
                    .col(ColumnDef::new(Alarms::Title).string().not_null())
                    .col(
                        ColumnDef::new(Alarms::AlarmDatetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alarms::ScheduledPostId).uuid())
                    .col(ColumnDef::new(Alarms::PlannedPostId).uuid())
                    .col(
                        ColumnDef::new(Alarms::SoundEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Alarms::NotificationEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Alarms::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Alarms::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(timestamp_column(Alarms::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alarms_scheduled_post")
                            .from(Alarms::Table, Alarms::ScheduledPostId)
                            .to(ScheduledPosts::Table, ScheduledPosts::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alarms_planned_post")
                            .from(Alarms::Table, Alarms::PlannedPostId)
                            .to(PlannedPosts::Table, PlannedPosts::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .check(
                        Expr::col(Alarms::ScheduledPostId)
                            .is_null()
                            .or(Expr::col(Alarms::PlannedPostId).is_null()),
                    )
                    .to_owned(),
            )
            .await?;

        // Every load filters by owner.
        manager
            .create_index(user_index(
                "idx_scheduled_posts_user",
                ScheduledPosts::Table,
                ScheduledPosts::UserId,
            ))
            .await?;
        manager
            .create_index(user_index(
                "idx_planned_posts_user",
                PlannedPosts::Table,
                PlannedPosts::UserId,
            ))
            .await?;
        manager
            .create_index(user_index(
                "idx_content_plans_user",
                ContentPlans::Table,
                ContentPlans::UserId,
            ))
            .await?;
        manager
            .create_index(user_index(
                "idx_alarms_user",
                Alarms::Table,
                Alarms::UserId,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alarms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlannedPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContentPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScheduledPosts::Table).to_owned())
            .await
    }
}

fn user_index<T, C>(name: &str, table: T, column: C) -> IndexCreateStatement
where
    T: IntoTableRef,
    C: IntoIndexColumn,
{
    Index::create()
        .name(name)
        .table(table)
        .col(column)
        .if_not_exists()
        .to_owned()
}

fn timestamp_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum ScheduledPosts {
    Table,
    Id,
    UserId,
    BrandProfileId,
    Title,
    Caption,
    Hashtags,
    Platforms,
    ImageUrl,
    ScheduledDate,
    ScheduledTime,
    Timezone,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContentPlans {
    Table,
    Id,
    UserId,
    BrandProfileId,
    Name,
    StartDate,
    EndDate,
    Frequency,
    TotalPosts,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PlannedPosts {
    Table,
    Id,
    ContentPlanId,
    UserId,
    Title,
    SuggestedDate,
    SuggestedTime,
    Rationale,
    Platforms,
    Status,
    OrderInPlan,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Alarms {
    Table,
    Id,
    UserId,
    Title,
    AlarmDatetime,
    ScheduledPostId,
    PlannedPostId,
    SoundEnabled,
    NotificationEnabled,
    Notes,
    Status,
    CreatedAt,
}
