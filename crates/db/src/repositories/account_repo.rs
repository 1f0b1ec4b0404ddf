//! Repository for the `accounts` table.

use sqlx::PgPool;
use vitaplan_core::paging::Paging;
use vitaplan_core::types::DbId;

use crate::models::account::Account;

const COLUMNS: &str = "account_id, email, password_hash, role, is_verified, account_status, \
    created_at, updated_at";

/// Provides CRUD operations for accounts. Password hashing happens in the
/// HTTP layer; this repo only ever sees the hash.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        account_id: DbId,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (account_id, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(account_id)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find an account by email (login path).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE account_id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List accounts, newest first. Fills in `paging.total`.
    pub async fn list(pool: &PgPool, paging: &mut Paging) -> Result<Vec<Account>, sqlx::Error> {
        paging.normalize();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(pool)
            .await?;
        paging.total = total;

        let query = format!(
            "SELECT {COLUMNS} FROM accounts
             ORDER BY created_at DESC
             OFFSET $1 LIMIT $2"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(paging.offset())
            .bind(paging.limit)
            .fetch_all(pool)
            .await
    }

    /// Flag an account as email-verified. Returns `true` if a row changed.
    pub async fn mark_verified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE accounts SET is_verified = true, updated_at = NOW()
             WHERE account_id = $1 AND is_verified = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock (`false`) or unlock (`true`) an account.
    /// Returns `true` if a row changed.
    pub async fn set_status(pool: &PgPool, id: DbId, status: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE accounts SET account_status = $2, updated_at = NOW() WHERE account_id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored password hash. Returns `true` if a row changed.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE account_id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
