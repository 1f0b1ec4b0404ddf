//! Participation rows: program enrollment and per-activity records.
//!
//! The composer only ever counts these; they are written by the
//! user-facing enrollment flow.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitaplan_core::types::{DbId, RowId, Timestamp};

/// A row from the `user_programs` table. Any row for a program marks the
/// program as "has participants" for deletion gating.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProgram {
    pub id: RowId,
    pub user_id: DbId,
    pub program_id: DbId,
    pub level_id: DbId,
    pub start_date: Option<Timestamp>,
    pub total_points: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `user_activities` table.
///
/// `status` holds the canonical text form of
/// [`vitaplan_core::enums::ParticipationStatus`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserActivity {
    pub id: RowId,
    pub user_id: DbId,
    pub activity_id: DbId,
    pub status: String,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for enrolling a user into a program at a starting level.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollProgram {
    pub program_id: DbId,
    pub level_id: DbId,
    pub start_date: Option<Timestamp>,
}
