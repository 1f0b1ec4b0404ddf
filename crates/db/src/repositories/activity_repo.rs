//! Repository for the `activities` table.

use sqlx::{PgPool, Postgres, Transaction};
use vitaplan_core::types::DbId;

use crate::models::activity::Activity;

const COLUMNS: &str = "activity_id, level_id, title, description, duration, point_reward, \
    activity_type, is_active, created_at, updated_at";

/// Provides CRUD operations for activities. The `activity_type` argument
/// is always the canonical enum text; parsing happens in the composer.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert an activity inside an open transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        activity_id: DbId,
        level_id: DbId,
        title: &str,
        description: Option<&str>,
        duration: i32,
        point_reward: i32,
        activity_type: &str,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities
                (activity_id, level_id, title, description, duration, point_reward, activity_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(activity_id)
            .bind(level_id)
            .bind(title)
            .bind(description)
            .bind(duration)
            .bind(point_reward)
            .bind(activity_type)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find an activity by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE activity_id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all activities of a level, oldest first.
    pub async fn list_by_level(pool: &PgPool, level_id: DbId) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE level_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(level_id)
            .fetch_all(pool)
            .await
    }

    /// Patch scalar fields inside an open transaction. Only non-`None`
    /// fields are applied; `activity_type` is pre-parsed canonical text.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        title: Option<&str>,
        description: Option<&str>,
        duration: Option<i32>,
        point_reward: Option<i32>,
        activity_type: Option<&str>,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration = COALESCE($4, duration),
                point_reward = COALESCE($5, point_reward),
                activity_type = COALESCE($6, activity_type),
                updated_at = NOW()
             WHERE activity_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(title)
            .bind(description)
            .bind(duration)
            .bind(point_reward)
            .bind(activity_type)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Soft path for activities with recorded participants.
    /// Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE activities SET is_active = false, updated_at = NOW() WHERE activity_id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one activity inside an open transaction. Repeat days must
    /// already be gone.
    pub async fn delete_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE activity_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all activities under any level of a program (hard delete
    /// cascade), inside an open transaction.
    pub async fn delete_by_program_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM activities
             WHERE level_id IN (SELECT level_id FROM levels WHERE program_id = $1)",
        )
        .bind(program_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
