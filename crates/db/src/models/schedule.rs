//! Schedule entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitaplan_core::types::{DbId, Timestamp};

/// A row from the `schedules` table: a placement of an activity within a
/// program's calendar.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub schedule_id: DbId,
    pub program_id: DbId,
    pub activity_id: DbId,
    pub week_number: i32,
    pub day_number: i32,
    pub repeat_interval: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a schedule. Both parents are verified to exist before
/// insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSchedule {
    pub program_id: DbId,
    pub activity_id: DbId,
    #[validate(range(min = 1))]
    pub week_number: i32,
    #[validate(range(min = 1, max = 7))]
    pub day_number: i32,
    /// Weeks between recurrences; 0 means no repetition.
    #[serde(default)]
    pub repeat_interval: i32,
}
