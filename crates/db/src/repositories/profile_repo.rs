//! Repository for the `profiles` table (one row per account).

use sqlx::PgPool;
use vitaplan_core::types::DbId;

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

const COLUMNS: &str = "account_id, full_name, year_of_birth, gender, weight, height, \
    avatar_url, health_goal, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile for an account, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        account_id: DbId,
        input: &CreateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles
                (account_id, full_name, year_of_birth, gender, weight, height,
                 avatar_url, health_goal)
             VALUES ($1, $2, $3, COALESCE($4, true), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(account_id)
            .bind(&input.full_name)
            .bind(input.year_of_birth)
            .bind(input.gender)
            .bind(input.weight)
            .bind(input.height)
            .bind(&input.avatar_url)
            .bind(&input.health_goal)
            .fetch_one(pool)
            .await
    }

    /// Find the profile of an account.
    pub async fn find_by_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE account_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the account has no profile yet.
    pub async fn update(
        pool: &PgPool,
        account_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                year_of_birth = COALESCE($3, year_of_birth),
                gender = COALESCE($4, gender),
                weight = COALESCE($5, weight),
                height = COALESCE($6, height),
                avatar_url = COALESCE($7, avatar_url),
                health_goal = COALESCE($8, health_goal),
                updated_at = NOW()
             WHERE account_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(account_id)
            .bind(&input.full_name)
            .bind(input.year_of_birth)
            .bind(input.gender)
            .bind(input.weight)
            .bind(input.height)
            .bind(&input.avatar_url)
            .bind(&input.health_goal)
            .fetch_optional(pool)
            .await
    }
}
