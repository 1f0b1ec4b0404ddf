//! Repository for the `experts` table.

use sqlx::PgPool;
use vitaplan_core::paging::Paging;
use vitaplan_core::types::DbId;

use crate::models::expert::{CreateExpert, Expert, UpdateExpert};

const COLUMNS: &str = "expert_id, account_id, full_name, date_of_birth, gender, \
    telephone_number, avatar_url, expert_type, is_deleted, created_at, updated_at";

/// Provides CRUD operations for experts. Deleted experts are hidden from
/// lookups; the flag exists so historic programs keep a valid owner.
pub struct ExpertRepo;

impl ExpertRepo {
    /// Insert a new expert, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        expert_id: DbId,
        input: &CreateExpert,
    ) -> Result<Expert, sqlx::Error> {
        let query = format!(
            "INSERT INTO experts
                (expert_id, account_id, full_name, date_of_birth, gender,
                 telephone_number, avatar_url, expert_type)
             VALUES ($1, $2, $3, $4, COALESCE($5, true), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expert>(&query)
            .bind(expert_id)
            .bind(input.account_id)
            .bind(&input.full_name)
            .bind(input.date_of_birth)
            .bind(input.gender)
            .bind(&input.telephone_number)
            .bind(&input.avatar_url)
            .bind(&input.expert_type)
            .fetch_one(pool)
            .await
    }

    /// Find an expert by its ID. Excludes deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expert>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM experts WHERE expert_id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Expert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the expert profile attached to a login account. This is how
    /// an acting user id resolves to an expert record.
    pub async fn find_by_account_id(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<Expert>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM experts WHERE account_id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Expert>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// List experts, newest first. Fills in `paging.total`.
    pub async fn list(pool: &PgPool, paging: &mut Paging) -> Result<Vec<Expert>, sqlx::Error> {
        paging.normalize();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM experts WHERE is_deleted = false")
                .fetch_one(pool)
                .await?;
        paging.total = total;

        let query = format!(
            "SELECT {COLUMNS} FROM experts
             WHERE is_deleted = false
             ORDER BY created_at DESC
             OFFSET $1 LIMIT $2"
        );
        sqlx::query_as::<_, Expert>(&query)
            .bind(paging.offset())
            .bind(paging.limit)
            .fetch_all(pool)
            .await
    }

    /// Update an expert. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpert,
    ) -> Result<Option<Expert>, sqlx::Error> {
        let query = format!(
            "UPDATE experts SET
                full_name = COALESCE($2, full_name),
                date_of_birth = COALESCE($3, date_of_birth),
                gender = COALESCE($4, gender),
                telephone_number = COALESCE($5, telephone_number),
                avatar_url = COALESCE($6, avatar_url),
                expert_type = COALESCE($7, expert_type),
                updated_at = NOW()
             WHERE expert_id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expert>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(input.date_of_birth)
            .bind(input.gender)
            .bind(&input.telephone_number)
            .bind(&input.avatar_url)
            .bind(&input.expert_type)
            .fetch_optional(pool)
            .await
    }

    /// Mark an expert deleted. Returns `true` if a row was updated.
    pub async fn mark_deleted(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE experts SET is_deleted = true, updated_at = NOW()
             WHERE expert_id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
