//! Repository for the `levels` table.

use sqlx::{PgPool, Postgres, Transaction};
use vitaplan_core::types::DbId;

use crate::models::level::Level;

const COLUMNS: &str =
    "level_id, program_id, name, description, point_require, is_active, created_at, updated_at";

/// Provides CRUD operations for levels.
pub struct LevelRepo;

impl LevelRepo {
    /// Insert a level under a program. Parent existence is the caller's
    /// responsibility (the composer checks it first).
    pub async fn insert(
        pool: &PgPool,
        level_id: DbId,
        program_id: DbId,
        name: &str,
        description: Option<&str>,
        point_require: i32,
    ) -> Result<Level, sqlx::Error> {
        let query = format!(
            "INSERT INTO levels (level_id, program_id, name, description, point_require)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(level_id)
            .bind(program_id)
            .bind(name)
            .bind(description)
            .bind(point_require)
            .fetch_one(pool)
            .await
    }

    /// Insert a level inside an open transaction (program composition).
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        level_id: DbId,
        program_id: DbId,
        name: &str,
        description: Option<&str>,
        point_require: i32,
    ) -> Result<Level, sqlx::Error> {
        let query = format!(
            "INSERT INTO levels (level_id, program_id, name, description, point_require)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(level_id)
            .bind(program_id)
            .bind(name)
            .bind(description)
            .bind(point_require)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a level by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Level>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM levels WHERE level_id = $1");
        sqlx::query_as::<_, Level>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all levels of a program, lowest requirement first.
    pub async fn list_by_program(
        pool: &PgPool,
        program_id: DbId,
    ) -> Result<Vec<Level>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM levels
             WHERE program_id = $1
             ORDER BY point_require ASC, created_at ASC"
        );
        sqlx::query_as::<_, Level>(&query)
            .bind(program_id)
            .fetch_all(pool)
            .await
    }

    /// Delete all levels of a program inside an open transaction (hard
    /// delete cascade). Activities must already be gone.
    pub async fn delete_by_program_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        program_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM levels WHERE program_id = $1")
            .bind(program_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
