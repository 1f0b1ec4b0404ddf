//! Refresh-session entity model.

use serde::Serialize;
use sqlx::FromRow;
use vitaplan_core::types::{DbId, RowId, Timestamp};

/// A row from the `refresh_sessions` table. Only the SHA-256 hash of the
/// opaque refresh token is stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RefreshSession {
    pub id: RowId,
    pub account_id: DbId,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
