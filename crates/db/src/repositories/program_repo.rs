//! Repository for the `programs` table.

use sqlx::{PgPool, Postgres, Transaction};
use vitaplan_core::paging::Paging;
use vitaplan_core::types::DbId;

use crate::models::program::{CreateProgramRequest, Program, UpdateProgramRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "program_id, title, description, duration, is_active, created_by, created_at, updated_at";

/// Provides CRUD operations for programs. Tree-wide workflows live in the
/// composer; this repo only touches the `programs` table itself.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a program row inside an open transaction.
    ///
    /// `is_active` always starts true; the identity is allocated by the
    /// caller so child rows can reference it before commit.
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
        created_by: DbId,
        input: &CreateProgramRequest,
    ) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs (program_id, title, description, duration, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(program_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration)
            .bind(created_by)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a program by its ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE program_id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List programs created by one expert, newest first. Fills in
    /// `paging.total`.
    pub async fn list_by_expert(
        pool: &PgPool,
        expert_id: DbId,
        paging: &mut Paging,
    ) -> Result<Vec<Program>, sqlx::Error> {
        paging.normalize();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM programs WHERE created_by = $1")
            .bind(expert_id)
            .fetch_one(pool)
            .await?;
        paging.total = total;

        let query = format!(
            "SELECT {COLUMNS} FROM programs
             WHERE created_by = $1
             ORDER BY created_at DESC
             OFFSET $2 LIMIT $3"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(expert_id)
            .bind(paging.offset())
            .bind(paging.limit)
            .fetch_all(pool)
            .await
    }

    /// Patch scalar fields inside an open transaction. Only non-`None`
    /// fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_scalars_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        input: &UpdateProgramRequest,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration = COALESCE($4, duration),
                updated_at = NOW()
             WHERE program_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Soft path for programs with participants: flip `is_active` off.
    /// Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE programs SET is_active = false, updated_at = NOW() WHERE program_id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the program row inside an open transaction. Child rows must
    /// already be gone; tree foreign keys have no cascade.
    pub async fn delete_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE program_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
