//! Integration tests for the program composition workflows.
//!
//! Exercises the composer against a real database:
//! - Full-tree creation in one transaction
//! - Rollback on enum parse failure mid-tree (no partial writes)
//! - Ownership gating on update/delete
//! - Participation-gated delete (deactivate vs hard delete, no orphans)
//! - Wholesale join-set replacement and its idempotence

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use vitaplan_core::error::CoreError;
use vitaplan_core::types::DbId;
use vitaplan_db::composer::{DeleteOutcome, ProgramComposer};
use vitaplan_db::error::DbError;
use vitaplan_db::models::activity::{CreateActivityRequest, UpdateActivityRequest};
use vitaplan_db::models::expert::{CreateExpert, Expert};
use vitaplan_db::models::level::CreateLevelRequest;
use vitaplan_db::models::participation::EnrollProgram;
use vitaplan_db::models::program::{
    CreateActivitySpec, CreateLevelSpec, CreateProgramRequest, UpdateProgramRequest,
};
use vitaplan_db::repositories::{
    AccountRepo, ActivityRepo, ExpertRepo, LevelRepo, ParticipationRepo, ProgramDiseaseRepo,
    ProgramGoalRepo, ProgramRepo, RepeatDayRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create an account plus expert profile; returns the account id the
/// composer resolves from, and the expert row.
async fn seed_expert(pool: &PgPool, email: &str) -> (DbId, Expert) {
    let account = AccountRepo::insert(pool, Uuid::new_v4(), email, "not-a-real-hash", "expert")
        .await
        .unwrap();
    let expert = ExpertRepo::insert(
        pool,
        Uuid::new_v4(),
        &CreateExpert {
            account_id: Some(account.account_id),
            full_name: "Dr. Minh".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 5, 1).unwrap(),
            gender: None,
            telephone_number: None,
            avatar_url: None,
            expert_type: "Nutritionist".to_string(),
        },
    )
    .await
    .unwrap();
    (account.account_id, expert)
}

async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    AccountRepo::insert(pool, Uuid::new_v4(), email, "not-a-real-hash", "user")
        .await
        .unwrap()
        .account_id
}

fn walk_activity(activity_type: &str, repeat_days: &[&str]) -> CreateActivitySpec {
    CreateActivitySpec {
        title: "Walk".to_string(),
        description: None,
        duration: 20,
        point_reward: 10,
        activity_type: activity_type.to_string(),
        repeat_days: repeat_days.iter().map(|d| d.to_string()).collect(),
    }
}

fn diabetes_program(activity_type: &str, repeat_days: &[&str]) -> CreateProgramRequest {
    CreateProgramRequest {
        title: "Diabetes Care".to_string(),
        description: Some("30-day glucose management plan".to_string()),
        duration: 30,
        disease_ids: vec![1],
        goal_ids: vec![1, 2],
        levels: vec![CreateLevelSpec {
            name: "Beginner".to_string(),
            description: None,
            point_require: 100,
            activities: vec![walk_activity(activity_type, repeat_days)],
        }],
    }
}

async fn table_count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Row counts across every table the composer writes.
async fn tree_counts(pool: &PgPool) -> [i64; 6] {
    [
        table_count(pool, "programs").await,
        table_count(pool, "levels").await,
        table_count(pool, "activities").await,
        table_count(pool, "activity_repeat_days").await,
        table_count(pool, "program_diseases").await,
        table_count(pool, "program_goals").await,
    ]
}

// ---------------------------------------------------------------------------
// Test: CreateProgram builds the whole tree
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_program_full_tree(pool: PgPool) {
    let (user_id, expert) = seed_expert(&pool, "minh@example.com").await;

    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday", "wednesday"]),
    )
    .await
    .unwrap();

    assert_eq!(program.title, "Diabetes Care");
    assert_eq!(program.duration, 30);
    assert!(program.is_active);
    assert_eq!(program.created_by, expert.expert_id);

    let levels = LevelRepo::list_by_program(&pool, program.program_id).await.unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].name, "Beginner");
    assert_eq!(levels[0].point_require, 100);

    let activities = ActivityRepo::list_by_level(&pool, levels[0].level_id).await.unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].title, "Walk");
    assert_eq!(activities[0].activity_type, "Activity");

    let days = RepeatDayRepo::list_by_activity(&pool, activities[0].activity_id)
        .await
        .unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].repeat_day, "monday");
    assert_eq!(days[1].repeat_day, "wednesday");

    let disease_ids = ProgramDiseaseRepo::list_ids_by_program(&pool, program.program_id)
        .await
        .unwrap();
    assert_eq!(disease_ids, vec![1]);
    let goal_ids = ProgramGoalRepo::list_ids_by_program(&pool, program.program_id)
        .await
        .unwrap();
    assert_eq!(goal_ids, vec![1, 2]);
}

// ---------------------------------------------------------------------------
// Test: atomicity on enum failure mid-tree
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_activity_type_rolls_back_everything(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;

    let err = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Yoga", &["monday", "wednesday"]),
    )
    .await
    .unwrap_err();

    assert_matches!(
        err,
        DbError::Core(CoreError::InvalidEnumValue { kind: "activity type", ref value })
            if value == "Yoga"
    );
    assert_eq!(tree_counts(&pool).await, [0, 0, 0, 0, 0, 0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_weekday_rolls_back_everything(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;

    // The program, join rows, level, and activity all insert before the
    // bad weekday is reached; none of it may survive.
    let err = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday", "someday"]),
    )
    .await
    .unwrap_err();

    assert_matches!(
        err,
        DbError::Core(CoreError::InvalidEnumValue { kind: "weekday", ref value })
            if value == "someday"
    );
    assert_eq!(tree_counts(&pool).await, [0, 0, 0, 0, 0, 0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_program_requires_expert_profile(pool: PgPool) {
    let stranger = seed_user(&pool, "user@example.com").await;

    let err = ProgramComposer::create_program(
        &pool,
        stranger,
        &diabetes_program("Activity", &["monday"]),
    )
    .await
    .unwrap_err();

    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "Expert", .. }));
    assert_eq!(tree_counts(&pool).await, [0, 0, 0, 0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Test: UpdateProgram wholesale join replacement and scalar patches
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_program_replaces_join_sets(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday"]),
    )
    .await
    .unwrap();

    let update = UpdateProgramRequest {
        title: Some("Diabetes Care v2".to_string()),
        description: None,
        duration: None,
        disease_ids: vec![2, 3],
        goal_ids: vec![],
    };
    let updated = ProgramComposer::update_program(&pool, program.program_id, user_id, &update)
        .await
        .unwrap();

    assert_eq!(updated.title, "Diabetes Care v2");
    // None scalars keep their previous values.
    assert_eq!(updated.duration, 30);
    assert_eq!(updated.description.as_deref(), Some("30-day glucose management plan"));

    let disease_ids = ProgramDiseaseRepo::list_ids_by_program(&pool, program.program_id)
        .await
        .unwrap();
    assert_eq!(disease_ids, vec![2, 3]);
    // Replacing with an empty list yields an empty set.
    let goal_ids = ProgramGoalRepo::list_ids_by_program(&pool, program.program_id)
        .await
        .unwrap();
    assert!(goal_ids.is_empty());

    // Replace, not append: the same update twice is idempotent.
    ProgramComposer::update_program(&pool, program.program_id, user_id, &update)
        .await
        .unwrap();
    let disease_ids = ProgramDiseaseRepo::list_ids_by_program(&pool, program.program_id)
        .await
        .unwrap();
    assert_eq!(disease_ids, vec![2, 3]);
    assert_eq!(table_count(&pool, "program_diseases").await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_program_by_non_owner_is_forbidden(pool: PgPool) {
    let (owner_id, _) = seed_expert(&pool, "owner@example.com").await;
    let (other_id, _) = seed_expert(&pool, "other@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        owner_id,
        &diabetes_program("Activity", &["monday"]),
    )
    .await
    .unwrap();

    let err = ProgramComposer::update_program(
        &pool,
        program.program_id,
        other_id,
        &UpdateProgramRequest {
            title: Some("Hijacked".to_string()),
            description: None,
            duration: None,
            disease_ids: vec![],
            goal_ids: vec![],
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, DbError::Core(CoreError::Forbidden(_)));

    // Zero writes happened: scalars and join sets are untouched.
    let unchanged = ProgramRepo::find_by_id(&pool, program.program_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.title, "Diabetes Care");
    let disease_ids = ProgramDiseaseRepo::list_ids_by_program(&pool, program.program_id)
        .await
        .unwrap();
    assert_eq!(disease_ids, vec![1]);
}

// ---------------------------------------------------------------------------
// Test: DeleteProgram participation gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_program_without_participants_removes_tree(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday", "wednesday"]),
    )
    .await
    .unwrap();

    let outcome = ProgramComposer::delete_program(&pool, user_id, program.program_id)
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
    // The whole owned tree is gone; no orphaned levels/activities/days.
    assert_eq!(tree_counts(&pool).await, [0, 0, 0, 0, 0, 0]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_program_with_participants_deactivates(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday"]),
    )
    .await
    .unwrap();
    let level = &LevelRepo::list_by_program(&pool, program.program_id).await.unwrap()[0];

    // Three enrolled users.
    for i in 0..3 {
        let member = seed_user(&pool, &format!("member{i}@example.com")).await;
        ParticipationRepo::enroll(
            &pool,
            member,
            &EnrollProgram {
                program_id: program.program_id,
                level_id: level.level_id,
                start_date: None,
            },
        )
        .await
        .unwrap();
    }

    let before = tree_counts(&pool).await;
    let outcome = ProgramComposer::delete_program(&pool, user_id, program.program_id)
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Deactivated);
    let kept = ProgramRepo::find_by_id(&pool, program.program_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!kept.is_active);
    // Nothing else moved: same row counts everywhere.
    assert_eq!(tree_counts(&pool).await, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_program_by_non_owner_is_forbidden(pool: PgPool) {
    let (owner_id, _) = seed_expert(&pool, "owner@example.com").await;
    let (other_id, _) = seed_expert(&pool, "other@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        owner_id,
        &diabetes_program("Activity", &["monday"]),
    )
    .await
    .unwrap();

    let err = ProgramComposer::delete_program(&pool, other_id, program.program_id)
        .await
        .unwrap_err();

    assert_matches!(err, DbError::Core(CoreError::Forbidden(_)));
    let kept = ProgramRepo::find_by_id(&pool, program.program_id)
        .await
        .unwrap()
        .unwrap();
    assert!(kept.is_active);
}

// ---------------------------------------------------------------------------
// Test: standalone level / activity operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_level_requires_existing_program(pool: PgPool) {
    let err = ProgramComposer::create_level(
        &pool,
        &CreateLevelRequest {
            program_id: Uuid::new_v4(),
            name: "Advanced".to_string(),
            description: None,
            point_require: 500,
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "Program", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_standalone_level_and_activity(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &CreateProgramRequest {
            title: "Back Care".to_string(),
            description: None,
            duration: 14,
            disease_ids: vec![],
            goal_ids: vec![],
            levels: vec![],
        },
    )
    .await
    .unwrap();

    let level = ProgramComposer::create_level(
        &pool,
        &CreateLevelRequest {
            program_id: program.program_id,
            name: "Starter".to_string(),
            description: Some("First two weeks".to_string()),
            point_require: 50,
        },
    )
    .await
    .unwrap();
    assert_eq!(level.program_id, program.program_id);

    let created = ProgramComposer::create_activity(
        &pool,
        &CreateActivityRequest {
            level_id: level.level_id,
            title: "Stretch".to_string(),
            description: None,
            duration: 10,
            point_reward: 5,
            // Mixed case parses since codecs are case-insensitive.
            activity_type: "challenge".to_string(),
            repeat_days: vec!["Friday".to_string()],
        },
    )
    .await
    .unwrap();

    assert_eq!(created.activity.activity_type, "Challenge");
    assert_eq!(created.repeat_days, vec!["friday"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_activity_invalid_weekday_rolls_back(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday"]),
    )
    .await
    .unwrap();
    let level = &LevelRepo::list_by_program(&pool, program.program_id).await.unwrap()[0];
    let before = table_count(&pool, "activities").await;

    let err = ProgramComposer::create_activity(
        &pool,
        &CreateActivityRequest {
            level_id: level.level_id,
            title: "Swim".to_string(),
            description: None,
            duration: 30,
            point_reward: 15,
            activity_type: "Activity".to_string(),
            repeat_days: vec!["funday".to_string()],
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, DbError::Core(CoreError::InvalidEnumValue { kind: "weekday", .. }));
    assert_eq!(table_count(&pool, "activities").await, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_activity_replaces_repeat_days(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday", "wednesday"]),
    )
    .await
    .unwrap();
    let level = &LevelRepo::list_by_program(&pool, program.program_id).await.unwrap()[0];
    let activity = &ActivityRepo::list_by_level(&pool, level.level_id).await.unwrap()[0];

    let updated = ProgramComposer::update_activity(
        &pool,
        activity.activity_id,
        &UpdateActivityRequest {
            title: None,
            description: None,
            duration: Some(25),
            point_reward: None,
            activity_type: Some("MiniGame".to_string()),
            repeat_days: vec!["friday".to_string()],
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.activity.duration, 25);
    assert_eq!(updated.activity.point_reward, 10);
    assert_eq!(updated.activity.activity_type, "MiniGame");
    // Old set is fully replaced, not merged.
    assert_eq!(updated.repeat_days, vec!["friday"]);
    let days = RepeatDayRepo::list_by_activity(&pool, activity.activity_id)
        .await
        .unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].repeat_day, "friday");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_activity_participation_gate(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday"]),
    )
    .await
    .unwrap();
    let level = &LevelRepo::list_by_program(&pool, program.program_id).await.unwrap()[0];
    let activity = &ActivityRepo::list_by_level(&pool, level.level_id).await.unwrap()[0];

    // With a recorded participant the activity is only deactivated.
    let member = seed_user(&pool, "member@example.com").await;
    ParticipationRepo::record_activity(
        &pool,
        member,
        activity.activity_id,
        vitaplan_core::enums::ParticipationStatus::Pending,
    )
    .await
    .unwrap();

    let outcome = ProgramComposer::delete_activity(&pool, activity.activity_id)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Deactivated);
    let kept = ActivityRepo::find_by_id(&pool, activity.activity_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!kept.is_active);

    // Remove the participation row; the gate now allows a hard delete.
    sqlx::query("DELETE FROM user_activities WHERE activity_id = $1")
        .bind(activity.activity_id)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = ProgramComposer::delete_activity(&pool, activity.activity_id)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(ActivityRepo::find_by_id(&pool, activity.activity_id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(table_count(&pool, "activity_repeat_days").await, 0);
}

// ---------------------------------------------------------------------------
// Test: tree loading
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_load_tree_returns_full_composition(pool: PgPool) {
    let (user_id, _) = seed_expert(&pool, "minh@example.com").await;
    let program = ProgramComposer::create_program(
        &pool,
        user_id,
        &diabetes_program("Activity", &["monday", "wednesday"]),
    )
    .await
    .unwrap();

    let tree = ProgramComposer::load_tree(&pool, program.program_id).await.unwrap();
    assert_eq!(tree.program.program_id, program.program_id);
    assert_eq!(tree.disease_ids, vec![1]);
    assert_eq!(tree.goal_ids, vec![1, 2]);
    assert_eq!(tree.levels.len(), 1);
    assert_eq!(tree.levels[0].activities.len(), 1);
    assert_eq!(
        tree.levels[0].activities[0].repeat_days,
        vec!["monday", "wednesday"]
    );
}
