use chrono::{NaiveDate, Utc};
use sea_orm::entity::prelude::Json;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use autopostr_core::domain::{
    AlarmStatus, ContentPlan, Frequency, PlanStatus, ScheduledPost, ScheduledStatus,
};
use autopostr_core::error::RepoError;
use autopostr_core::ports::{
    AlarmRepository, BaseRepository, ContentPlanRepository, PlannedPostRepository,
    ScheduledPostRepository,
};

use crate::database::entity::{content_plan, scheduled_post};
use crate::database::postgres_repo::{
    PostgresAlarmRepository, PostgresContentPlanRepository, PostgresPlannedPostRepository,
    PostgresScheduledPostRepository,
};

fn scheduled_row(id: Uuid, user_id: Uuid, status: &str) -> scheduled_post::Model {
    let now = Utc::now();
    scheduled_post::Model {
        id,
        user_id,
        brand_profile_id: None,
        title: "Launch teaser".to_owned(),
        caption: "Coming soon".to_owned(),
        hashtags: Json::from(vec!["#launch"]),
        platforms: Json::from(vec!["instagram", "linkedin"]),
        image_url: None,
        scheduled_date: "2024-06-03".to_owned(),
        scheduled_time: "09:00".to_owned(),
        timezone: "UTC".to_owned(),
        status: status.to_owned(),
        notes: String::new(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn test_find_scheduled_posts_by_user() {
    let user_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            scheduled_row(Uuid::new_v4(), user_id, "scheduled"),
            scheduled_row(Uuid::new_v4(), user_id, "archived"),
        ]])
        .into_connection();

    let repo = PostgresScheduledPostRepository::new(db);
    let posts = repo.find_by_user_id(user_id).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].status, ScheduledStatus::Scheduled);
    assert_eq!(posts[0].platforms, vec!["instagram", "linkedin"]);
    assert_eq!(posts[0].hashtags, vec!["#launch"]);
    // Unknown statuses read back as the default rather than failing the load.
    assert_eq!(posts[1].status, ScheduledStatus::Draft);
}

#[tokio::test]
async fn test_insert_many_empty_batch_skips_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresScheduledPostRepository::new(db);

    let stored = repo.insert_many(Vec::new()).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_insert_many_returns_written_posts() {
    let user_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(2)])
        .into_connection();
    let repo = PostgresScheduledPostRepository::new(db);

    let posts: Vec<ScheduledPost> = vec![
        scheduled_row(Uuid::new_v4(), user_id, "draft").into(),
        scheduled_row(Uuid::new_v4(), user_id, "draft").into(),
    ];
    let stored = repo.insert_many(posts.clone()).await.unwrap();
    assert_eq!(stored, posts);
}

#[tokio::test]
async fn test_save_updates_existing_row() {
    let id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let existing = scheduled_row(id, user_id, "draft");
    let mut updated = existing.clone();
    updated.status = "scheduled".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![existing], vec![updated.clone()]])
        .into_connection();
    let repo = PostgresScheduledPostRepository::new(db);

    let saved: ScheduledPost = repo.save(updated.into()).await.unwrap();
    assert_eq!(saved.id, id);
    assert_eq!(saved.status, ScheduledStatus::Scheduled);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(0)])
        .into_connection();
    let repo = PostgresScheduledPostRepository::new(db);

    let result = BaseRepository::<ScheduledPost, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_by_plan_reports_removed_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(3)])
        .into_connection();
    let repo = PostgresPlannedPostRepository::new(db);

    assert_eq!(repo.delete_by_plan(Uuid::new_v4()).await.unwrap(), 3);
}

#[tokio::test]
async fn test_insert_content_plan_round_trips_frequency() {
    let plan = ContentPlan::new(
        Uuid::new_v4(),
        None,
        "Summer".to_owned(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
        Frequency::Biweekly,
        7,
    );
    let row = content_plan::Model {
        id: plan.id,
        user_id: plan.user_id,
        brand_profile_id: None,
        name: plan.name.clone(),
        start_date: plan.start_date,
        end_date: plan.end_date,
        frequency: "biweekly".to_owned(),
        total_posts: 7,
        status: "active".to_owned(),
        created_at: plan.created_at.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();
    let repo = PostgresContentPlanRepository::new(db);

    let stored = repo.insert(plan.clone()).await.unwrap();
    assert_eq!(stored.frequency, Frequency::Biweekly);
    assert_eq!(stored.status, PlanStatus::Active);
    assert_eq!(stored.total_posts, 7);
}

#[tokio::test]
async fn test_update_status_of_missing_alarm_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![exec(0), exec(1)])
        .into_connection();
    let repo = PostgresAlarmRepository::new(db);

    assert!(matches!(
        repo.update_status(Uuid::new_v4(), AlarmStatus::Dismissed).await,
        Err(RepoError::NotFound)
    ));
    repo.update_status(Uuid::new_v4(), AlarmStatus::Dismissed)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_postgres_store_repositories_share_one_connection() {
    let user_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![scheduled_row(
            Uuid::new_v4(),
            user_id,
            "scheduled",
        )]])
        .append_exec_results(vec![exec(2)])
        .into_connection();

    let store = crate::database::postgres_store(db);

    let posts = store.scheduled_posts.find_by_user_id(user_id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(
        store.planned_posts.delete_by_plan(Uuid::new_v4()).await.unwrap(),
        2
    );
}
