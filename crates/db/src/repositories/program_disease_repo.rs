//! Repository for the `program_diseases` join table.
//!
//! Join rows are owned by the program and replaced wholesale, never
//! diffed.

use sqlx::{PgPool, Postgres, Transaction};
use vitaplan_core::types::{DbId, RowId};

pub struct ProgramDiseaseRepo;

impl ProgramDiseaseRepo {
    /// Insert one join row per disease ID inside an open transaction.
    /// An empty slice is a no-op.
    pub async fn insert_many_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
        disease_ids: &[RowId],
    ) -> Result<(), sqlx::Error> {
        for disease_id in disease_ids {
            sqlx::query("INSERT INTO program_diseases (program_id, disease_id) VALUES ($1, $2)")
                .bind(program_id)
                .bind(disease_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Replace the program's disease set: delete existing rows, then
    /// insert the new set (which may be empty).
    pub async fn replace_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
        disease_ids: &[RowId],
    ) -> Result<(), sqlx::Error> {
        Self::delete_by_program_in_tx(tx, program_id).await?;
        Self::insert_many_in_tx(tx, program_id, disease_ids).await
    }

    /// Disease IDs linked to a program, ascending.
    pub async fn list_ids_by_program(
        pool: &PgPool,
        program_id: DbId,
    ) -> Result<Vec<RowId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT disease_id FROM program_diseases WHERE program_id = $1 ORDER BY disease_id",
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
        sqlx::query("DELETE FROM program_diseases WHERE program_id = $1")
            .bind(program_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
