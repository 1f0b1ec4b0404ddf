//! Activity and repeat-day entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitaplan_core::types::{DbId, RowId, Timestamp};

/// A row from the `activities` table.
///
/// `activity_type` holds the canonical text form of
/// [`vitaplan_core::enums::ActivityType`]; the composer guarantees only
/// closed-set values are ever written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub activity_id: DbId,
    /// Owning level; immutable once created.
    pub level_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Minutes per session.
    pub duration: i32,
    pub point_reward: i32,
    pub activity_type: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `activity_repeat_days` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityRepeatDay {
    pub id: RowId,
    pub activity_id: DbId,
    pub repeat_day: String,
}

/// DTO for creating a standalone activity under an existing level.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivityRequest {
    pub level_id: DbId,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 1))]
    pub point_reward: i32,
    /// Raw enum input, parsed by the composer.
    pub activity_type: String,
    #[serde(default)]
    pub repeat_days: Vec<String>,
}

/// DTO for updating an activity. Scalars are patched; the repeat-day set
/// is always replaced wholesale with `repeat_days`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[validate(range(min = 1))]
    pub point_reward: Option<i32>,
    pub activity_type: Option<String>,
    #[serde(default)]
    pub repeat_days: Vec<String>,
}

/// An activity enriched with its repeat days.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityWithRepeatDays {
    #[serde(flatten)]
    pub activity: Activity,
    pub repeat_days: Vec<String>,
}
