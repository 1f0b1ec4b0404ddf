//! Repository for the `user_programs` and `user_activities` tables.
//!
//! The counting methods are the participation gate: the composer treats
//! `count > 0` as "has participants" and never reads anything else here.

use sqlx::PgPool;
use vitaplan_core::enums::ParticipationStatus;
use vitaplan_core::types::DbId;

use crate::models::participation::{EnrollProgram, UserActivity, UserProgram};

pub struct ParticipationRepo;

impl ParticipationRepo {
    /// Number of enrollment rows for a program.
    pub async fn count_by_program(pool: &PgPool, program_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_programs WHERE program_id = $1")
            .bind(program_id)
            .fetch_one(pool)
            .await
    }

    /// Number of participation rows for an activity.
    pub async fn count_by_activity(pool: &PgPool, activity_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_activities WHERE activity_id = $1")
            .bind(activity_id)
            .fetch_one(pool)
            .await
    }

    /// Enroll a user into a program at a starting level.
    pub async fn enroll(
        pool: &PgPool,
        user_id: DbId,
        input: &EnrollProgram,
    ) -> Result<UserProgram, sqlx::Error> {
        sqlx::query_as::<_, UserProgram>(
            "INSERT INTO user_programs (user_id, program_id, level_id, start_date)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, program_id, level_id, start_date, total_points,
                       created_at, updated_at",
        )
        .bind(user_id)
        .bind(input.program_id)
        .bind(input.level_id)
        .bind(input.start_date)
        .fetch_one(pool)
        .await
    }

    /// Record a user's participation in an activity.
    pub async fn record_activity(
        pool: &PgPool,
        user_id: DbId,
        activity_id: DbId,
        status: ParticipationStatus,
    ) -> Result<UserActivity, sqlx::Error> {
        sqlx::query_as::<_, UserActivity>(
            "INSERT INTO user_activities (user_id, activity_id, status, completed_at)
             VALUES ($1, $2, $3, CASE WHEN $3 = 'complete' THEN NOW() END)
             RETURNING id, user_id, activity_id, status, completed_at, created_at",
        )
        .bind(user_id)
        .bind(activity_id)
        .bind(status.as_str())
        .fetch_one(pool)
        .await
    }
}
