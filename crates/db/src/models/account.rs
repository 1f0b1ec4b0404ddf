//! Account entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitaplan_core::types::{DbId, Timestamp};

/// A row from the `accounts` table.
///
/// `account_status == false` means the account has been locked by an
/// administrator; locked accounts cannot log in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub account_id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_verified: bool,
    pub account_status: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an account. `password` is the plaintext from the
/// request; hashing happens in the HTTP layer before this reaches a repo.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccount {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 100))]
    pub password: String,
    /// Defaults to `user` if omitted.
    pub role: Option<String>,
}
