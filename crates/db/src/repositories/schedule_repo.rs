//! Repository for the `schedules` table.

use sqlx::{PgPool, Postgres, Transaction};
use vitaplan_core::types::DbId;

use crate::models::schedule::{CreateSchedule, Schedule};

const COLUMNS: &str =
    "schedule_id, program_id, activity_id, week_number, day_number, repeat_interval, created_at";

pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Insert a schedule. Parent existence is verified by the caller.
    /// A negative repeat interval is clamped to 0.
    pub async fn insert(
        pool: &PgPool,
        schedule_id: DbId,
        input: &CreateSchedule,
    ) -> Result<Schedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedules
                (schedule_id, program_id, activity_id, week_number, day_number, repeat_interval)
             VALUES ($1, $2, $3, $4, $5, GREATEST($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(schedule_id)
            .bind(input.program_id)
            .bind(input.activity_id)
            .bind(input.week_number)
            .bind(input.day_number)
            .bind(input.repeat_interval)
            .fetch_one(pool)
            .await
    }

    /// List a program's schedule in calendar order.
    pub async fn list_by_program(
        pool: &PgPool,
        program_id: DbId,
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE program_id = $1
             ORDER BY week_number, day_number"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(program_id)
            .fetch_all(pool)
            .await
    }

    /// Delete all schedules of a program inside an open transaction
    /// (hard delete cascade).
    pub async fn delete_by_program_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM schedules WHERE program_id = $1")
            .bind(program_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Delete all schedules referencing one activity inside an open
    /// transaction (activity hard delete).
    pub async fn delete_by_activity_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM schedules WHERE activity_id = $1")
            .bind(activity_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
