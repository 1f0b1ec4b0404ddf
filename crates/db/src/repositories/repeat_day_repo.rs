//! Repository for the `activity_repeat_days` table.
//!
//! Repeat days are owned rows: created with their activity, replaced
//! wholesale on activity update, deleted with the activity. There is no
//! per-row update.

use sqlx::{PgPool, Postgres, Transaction};
use vitaplan_core::enums::WeekDay;
use vitaplan_core::types::DbId;

use crate::models::activity::ActivityRepeatDay;

pub struct RepeatDayRepo;

impl RepeatDayRepo {
    /// Insert one row per weekday inside an open transaction. An empty
    /// slice is a no-op; duplicates are inserted as given.
    pub async fn insert_many_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
        days: &[WeekDay],
    ) -> Result<(), sqlx::Error> {
        for day in days {
            sqlx::query("INSERT INTO activity_repeat_days (activity_id, repeat_day) VALUES ($1, $2)")
                .bind(activity_id)
                .bind(day.as_str())
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Replace the full repeat-day set of an activity: delete existing
    /// rows, then insert the new set.
    pub async fn replace_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
        days: &[WeekDay],
    ) -> Result<(), sqlx::Error> {
        Self::delete_by_activity_in_tx(tx, activity_id).await?;
        Self::insert_many_in_tx(tx, activity_id, days).await
    }

    /// List the repeat days of an activity in insertion order.
    pub async fn list_by_activity(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Vec<ActivityRepeatDay>, sqlx::Error> {
        sqlx::query_as::<_, ActivityRepeatDay>(
            "SELECT id, activity_id, repeat_day FROM activity_repeat_days
             WHERE activity_id = $1
             ORDER BY id ASC",
        )
        .bind(activity_id)
        .fetch_all(pool)
        .await
    }

    /// Delete all repeat days of one activity inside an open transaction.
    pub async fn delete_by_activity_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM activity_repeat_days WHERE activity_id = $1")
            .bind(activity_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Delete all repeat days under any activity of a program (hard
    /// delete cascade), inside an open transaction.
    pub async fn delete_by_program_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM activity_repeat_days
             WHERE activity_id IN (
                 SELECT a.activity_id FROM activities a
                 JOIN levels l ON l.level_id = a.level_id
                 WHERE l.program_id = $1
             )",
        )
        .bind(program_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
