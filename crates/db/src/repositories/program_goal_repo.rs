//! Repository for the `program_goals` join table. Mirrors the
//! program-disease repo: owned rows, wholesale replacement.

use sqlx::{PgPool, Postgres, Transaction};
use vitaplan_core::types::{DbId, RowId};

pub struct ProgramGoalRepo;

impl ProgramGoalRepo {
    /// Insert one join row per goal ID inside an open transaction.
    /// An empty slice is a no-op.
    pub async fn insert_many_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
        goal_ids: &[RowId],
    ) -> Result<(), sqlx::Error> {
        for goal_id in goal_ids {
            sqlx::query("INSERT INTO program_goals (program_id, goal_id) VALUES ($1, $2)")
                .bind(program_id)
                .bind(goal_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Replace the program's goal set: delete existing rows, then insert
    /// the new set (which may be empty).
    pub async fn replace_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
        goal_ids: &[RowId],
    ) -> Result<(), sqlx::Error> {
        Self::delete_by_program_in_tx(tx, program_id).await?;
        Self::insert_many_in_tx(tx, program_id, goal_ids).await
    }

    /// Goal IDs linked to a program, ascending.
    pub async fn list_ids_by_program(
        pool: &PgPool,
        program_id: DbId,
    ) -> Result<Vec<RowId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT goal_id FROM program_goals WHERE program_id = $1 ORDER BY goal_id",
        )
        .bind(program_id)
        .fetch_all(pool)
        .await
    }

    /// Delete all join rows of a program inside an open transaction.
    pub async fn delete_by_program_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM program_goals WHERE program_id = $1")
            .bind(program_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
